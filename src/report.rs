use sheetstrings::ExportReport;
use std::fmt::Display;
use std::path::Path;

/// What a piece of summary text is, mapped to an SGR code when color is on.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Rule,
    Target,
    Locale,
    Counts,
    Detail,
    Warning,
    Elapsed,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Rule => "90",
            Tone::Target => "34",
            Tone::Locale => "1;32",
            Tone::Counts => "33",
            Tone::Detail => "2",
            Tone::Warning => "33",
            Tone::Elapsed => "32",
        }
    }
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, tone: Tone, text: impl Display) -> String {
        if self.color { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }

    fn rule(&self, title: &str) -> String {
        self.paint(Tone::Rule, format!("━━━ {title} ━━━"))
    }
}

pub fn print_export(report: &ExportReport, output_dir: &Path, color: bool) {
    let p = Painter { color };
    println!("\n{}", p.paint(Tone::Title, format!("⚙  Exported to \"{}\"", output_dir.display())));

    println!("\n{}", p.rule("Exports"));
    if report.summaries.is_empty() {
        println!("  {}", p.paint(Tone::Detail, "No sheets exported"));
    }
    for summary in &report.summaries {
        let counts = format!("{} strings in {} groups, {} plurals", summary.entries, summary.groups, summary.plurals);
        println!(
            "  {} {} {} {}",
            p.paint(Tone::Target, format!("[{}]", summary.target)),
            p.paint(Tone::Locale, &summary.locale),
            p.paint(Tone::Detail, "│"),
            p.paint(Tone::Counts, counts),
        );
        if summary.overridden > 0 {
            println!("      {}", p.paint(Tone::Detail, format!("{} platform overrides", summary.overridden)));
        }
        for file in &summary.files {
            println!("      {}", p.paint(Tone::Detail, file.display()));
        }
    }

    if !report.skipped.is_empty() {
        println!("\n{}", p.paint(Tone::Warning, "Skipped sheets without a header row:"));
        for title in &report.skipped {
            println!("  • {title}");
        }
    }

    println!("\n{}", p.rule("Timing"));
    println!(
        "  Total: {}  │  Parse: {}  │  Export: {}",
        p.paint(Tone::Elapsed, format!("{:?}", report.total)),
        p.paint(Tone::Elapsed, format!("{:?}", report.parse)),
        p.paint(Tone::Detail, format!("{:?}", report.export)),
    );
    println!();
}
