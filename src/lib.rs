//! Spreadsheet localization rows to platform string resources.
//!
//! ```text
//! Workbook (JSON) ──▶ Sheet::parse ──▶ LocalizedEntry (key parsed by CompositeKey::parse)
//!                                            │
//!                         build_model (per locale and renderer)
//!                                            │
//!                                            ▼
//!                                   LocalizationModel ──▶ Renderer::export
//! ```
//!
//! Keys follow `<group>_<identifier>` (or `<group>__<identifier>` for
//! multi-word groups) with an optional `__pl_<quantity>` plural suffix. A
//! column named after a renderer's tag (`android`, `ios`) overrides the
//! primary value for that platform verbatim.

#[macro_use]
mod macros;

mod builder;
mod error;
mod key;
mod model;
mod pipeline;
mod render;
mod sheet;
mod source;

pub use builder::{build_model, escape, resolve_entry};
pub use error::{Error, RenderError, Result};
pub use key::{CompositeKey, KeyError, Quantity};
pub use model::{Group, LocalizationModel, LocalizedEntry, PluralGroup, ResolvedEntry};
pub use pipeline::{ExportOptions, ExportReport, ExportSummary, export, export_sheet, provenance_headers};
pub use render::{AndroidRenderer, DEFAULT_LOCALE, IosRenderer, Renderer, Renderers};
pub use sheet::{ColumnNames, Columns, Sheet};
pub use source::{Cell, RawSheet, Workbook};
