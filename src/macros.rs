/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Patterns are literals checked by the unit tests, so a bad pattern fails
/// the first test that touches it rather than a user run.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("static pattern compiles"));
        &*RE
    }};
}
