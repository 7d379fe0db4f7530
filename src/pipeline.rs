//! Export pipeline.
//!
//! ```text
//! Workbook ──▶ one thread per sheet: Sheet::parse        ─┐
//!                                                         │ join (first error aborts)
//!          ──▶ one thread per (sheet, target):            ◀┘
//!                 build_model ──▶ Renderer::export       ─┐
//!                                                         │ join (first error aborts)
//!                                                         ▼
//!                                                    ExportReport
//! ```
//!
//! Workers share nothing mutable: every parse worker owns its sheet, and
//! every export worker builds its own model from a shared, read-only sheet.

use crate::builder::build_model;
use crate::error::{Error, Result};
use crate::render::{Renderer, Renderers};
use crate::sheet::{ColumnNames, Sheet};
use crate::source::{RawSheet, Workbook};
use chrono::{DateTime, FixedOffset, Local};
use std::collections::HashSet;
use std::path::PathBuf;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

/// Settings for a run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub columns: ColumnNames,
    /// Timestamp written into every generated file.
    pub generated_at: DateTime<FixedOffset>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let generated_at = if cfg!(test) {
            DateTime::from_timestamp(1_360_643_400, 0).unwrap_or_default().fixed_offset()
        } else {
            Local::now().fixed_offset()
        };
        ExportOptions { columns: ColumnNames::default(), generated_at }
    }
}

/// What one (locale, target) export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub locale: String,
    pub target: &'static str,
    pub groups: usize,
    pub entries: usize,
    pub plurals: usize,
    /// Entries whose value came from the target's override column.
    pub overridden: usize,
    pub files: Vec<PathBuf>,
}

/// Result of [`export`].
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// One summary per (sheet, target), in sheet order then target order.
    pub summaries: Vec<ExportSummary>,
    /// Titles of sheets skipped for having no header row.
    pub skipped: Vec<String>,
    /// Time spent parsing sheets.
    pub parse: Duration,
    /// Time spent building models and writing files.
    pub export: Duration,
    pub total: Duration,
}

/// Provenance lines for the files generated from `sheet`.
pub fn provenance_headers(workbook: &Workbook, sheet: &RawSheet, generated_at: DateTime<FixedOffset>) -> Vec<String> {
    vec![
        format!("Generated by sheetstrings v{}", env!("CARGO_PKG_VERSION")),
        "Do _not_ modify".to_string(),
        workbook.source_line(sheet),
        format!("Last updated at {}", generated_at.to_rfc3339()),
    ]
}

/// Parse every sheet of `workbook` and export it with each renderer in `targets`.
pub fn export<S: AsRef<str>>(
    workbook: &Workbook,
    renderers: &Renderers,
    targets: &[S],
    options: &ExportOptions,
) -> Result<ExportReport> {
    let started = Instant::now();
    let targets = renderers.select(targets)?;

    let mut skipped = Vec::new();
    let mut raw_sheets: Vec<&RawSheet> = Vec::new();
    for sheet in &workbook.sheets {
        if sheet.values.is_empty() {
            tracing::warn!(title = %sheet.title, "sheet has no header row, skipping");
            skipped.push(sheet.title.clone());
        } else {
            raw_sheets.push(sheet);
        }
    }

    let mut locales = HashSet::new();
    for sheet in &raw_sheets {
        if !locales.insert(sheet.locale()) {
            return Err(Error::DuplicateLocale(sheet.locale().to_string()));
        }
    }

    let parse_started = Instant::now();
    let sheets: Vec<Sheet> = thread::scope(|scope| {
        let handles: Vec<_> =
            raw_sheets.iter().map(|&raw| scope.spawn(move || Sheet::parse(raw, &options.columns))).collect();
        handles.into_iter().map(join).collect::<Result<Vec<_>>>()
    })?;
    let parse = parse_started.elapsed();

    let export_started = Instant::now();
    let summaries = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(sheets.len() * targets.len());
        for (sheet, &raw) in sheets.iter().zip(&raw_sheets) {
            let headers = provenance_headers(workbook, raw, options.generated_at);
            for &renderer in &targets {
                let headers = headers.clone();
                handles.push(scope.spawn(move || export_sheet(sheet, renderer, &headers)));
            }
        }
        handles.into_iter().map(join).collect::<Result<Vec<_>>>()
    })?;
    let export = export_started.elapsed();

    Ok(ExportReport { summaries, skipped, parse, export, total: started.elapsed() })
}

/// Build the model of `sheet` for `renderer` and write its files.
pub fn export_sheet(sheet: &Sheet, renderer: &dyn Renderer, headers: &[String]) -> Result<ExportSummary> {
    let model = build_model(&sheet.entries, renderer, sheet.override_column(renderer.tag()), headers);
    let files = renderer.export(&sheet.locale, &model).map_err(|source| Error::Render {
        renderer: renderer.tag(),
        locale: sheet.locale.clone(),
        source,
    })?;

    Ok(ExportSummary {
        locale: sheet.locale.clone(),
        target: renderer.tag(),
        groups: model.groups.len(),
        entries: model.entry_count(),
        plurals: model.plurals.len(),
        overridden: model.groups.iter().flat_map(|g| g.entries.iter()).filter(|e| e.overridden).count(),
        files,
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}
