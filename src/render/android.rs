//! Android string resources.
//!
//! Writes `values[-<locale>]/generated_strings.xml`: one `<!-- region -->`
//! block per group and a trailing Plurals region. Plural items reference the
//! variant's own `<string>` so the text lives in one place.

use super::{DEFAULT_LOCALE, Renderer, write_file};
use crate::builder::escape;
use crate::error::RenderError;
use crate::model::LocalizationModel;
use std::fmt::Write;
use std::path::PathBuf;

pub const TAG: &str = "android";
const FILE_NAME: &str = "generated_strings.xml";

#[derive(Debug, Clone)]
pub struct AndroidRenderer {
    output_dir: PathBuf,
}

impl AndroidRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        AndroidRenderer { output_dir: output_dir.into() }
    }

    /// `values` for the default locale, `values-<locale>` otherwise.
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        if locale == DEFAULT_LOCALE {
            self.output_dir.join("values")
        } else {
            self.output_dir.join(format!("values-{locale}"))
        }
    }
}

impl Renderer for AndroidRenderer {
    fn tag(&self) -> &'static str {
        TAG
    }

    /// `%@` -> `%s`, `%1$@` -> `%1$s`.
    fn normalize(&self, value: &str) -> String {
        regex!(r"%(\d+\$)?@").replace_all(value, "%${1}s").into_owned()
    }

    fn export(&self, locale: &str, model: &LocalizationModel) -> Result<Vec<PathBuf>, RenderError> {
        let xml = render_resources(model)?;
        Ok(vec![write_file(&self.locale_dir(locale), FILE_NAME, &xml)?])
    }
}

pub(crate) fn render_resources(model: &LocalizationModel) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    for header in &model.headers {
        writeln!(out, "<!-- {} -->", comment_text(header))?;
    }
    writeln!(out, "<resources>")?;

    for group in &model.groups {
        writeln!(out, "    <!-- region {} -->", comment_text(&group.name))?;
        for entry in &group.entries {
            if let Some(comment) = &entry.comment {
                writeln!(out, "    <!-- {} -->", comment_text(comment))?;
            }
            writeln!(out, r#"    <string name="{}">{}</string>"#, escape(entry.key.original()), entry.value)?;
        }
        writeln!(out, "    <!-- endregion -->")?;
        writeln!(out)?;
    }

    if !model.plurals.is_empty() {
        writeln!(out, "    <!-- region Plurals -->")?;
        for plural in model.plurals.values() {
            writeln!(out, r#"    <plurals name="{}">"#, escape(&plural.key))?;
            for (quantity, entry) in &plural.values {
                let name = escape(entry.key.original());
                writeln!(out, r#"        <item quantity="{quantity}">@string/{name}</item>"#)?;
            }
            writeln!(out, "    </plurals>")?;
        }
        writeln!(out, "    <!-- endregion -->")?;
    }

    writeln!(out, "</resources>")?;
    Ok(out)
}

// `--` is not allowed inside an XML comment.
fn comment_text(text: &str) -> String {
    text.replace("--", "- -")
}
