mod report;

use clap::{Parser, Subcommand};
use sheetstrings::{ColumnNames, ExportOptions, ExportReport, Renderers, Result, Workbook, export};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "Export localized strings from a spreadsheet workbook.

Each sheet is one locale (the sheet titled 'default' is the base locale) with the columns
[key, value, comment] plus optional platform columns such as 'android' or 'ios'.

Keys:
    Keys must match '<group>_<identifier>'. If the group name has several parts, separate it
    from the identifier with '__' ('song_line__bottles_of_beer'). Groups keep related strings
    together in the output.

Plurals:
    Plural variants end in '__pl_<zero|one|two|few|many|other>'. Variants sharing the rest of
    the key are exported together.

Values:
    Values are normalized and escaped for the target platform. A non-empty cell in the column
    named after the platform is used as-is instead.";

#[derive(Debug, Parser)]
#[command(
    name = "sheetstrings",
    about = "Export spreadsheet localizations as Android and iOS resources",
    long_about = LONG_ABOUT,
    version
)]
struct Cli {
    /// Workbook JSON export to read.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory where the per-locale folders are generated.
    #[arg(short, long, default_value = "exports")]
    output_folder: PathBuf,

    /// Spreadsheet id used for the source link in file headers.
    #[arg(short, long)]
    sheet_id: Option<String>,

    /// Name of the key column.
    #[arg(short, long, default_value = "key")]
    key: String,

    /// Name of the value column.
    #[arg(long, default_value = "value")]
    value: String,

    /// Name of the comment column.
    #[arg(short, long, default_value = "comment")]
    comment: String,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    /// Force ANSI color in the summary.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the summary.
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    target: Target,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Target {
    /// Android `values*/generated_strings.xml`. Values are escaped, the 'android' column is used as-is.
    Android,
    /// iOS `Localizable.strings`, `Localizable.stringsdict` and `Strings.swift`. The 'ios' column is used as-is.
    Ios,
    /// Every registered platform.
    All,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    match run(&cli) {
        Ok(report) => report::print_export(&report, &cli.output_folder, color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<ExportReport> {
    let mut workbook = Workbook::from_path(&cli.input)?;
    if let Some(id) = &cli.sheet_id {
        workbook.spreadsheet_id = Some(id.clone());
    }

    let renderers = Renderers::standard(&cli.output_folder);
    let targets: Vec<&str> = match cli.target {
        Target::Android => vec!["android"],
        Target::Ios => vec!["ios"],
        Target::All => renderers.tags().collect(),
    };

    let options = ExportOptions {
        columns: ColumnNames { key: cli.key.clone(), value: cli.value.clone(), comment: cli.comment.clone() },
        ..ExportOptions::default()
    };

    export(&workbook, &renderers, &targets[..], &options)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}
