//! Error types.
//!
//! Every failure is fatal to the run. The variants exist so the binary can
//! pick an exit code per failure kind and tests can match on them.

use crate::key::KeyError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A renderer could not produce its output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("sheet '{locale}', row {row}: {source}")]
    Key {
        locale: String,
        /// 1-based spreadsheet row number (the header is row 1).
        row: usize,
        #[source]
        source: KeyError,
    },
    #[error("sheet '{locale}' has no '{column}' column")]
    MissingColumn { locale: String, column: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse workbook: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{renderer} export of '{locale}' failed: {source}")]
    Render {
        renderer: &'static str,
        locale: String,
        #[source]
        source: RenderError,
    },
    #[error("more than one sheet for locale '{0}'")]
    DuplicateLocale(String),
    #[error("no renderer registered for '{0}'")]
    UnknownRenderer(String),
}

impl Error {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownRenderer(_) => 2,
            Error::Key { source: KeyError::Malformed { .. }, .. } => 3,
            Error::Key { source: KeyError::UnknownQuantity { .. }, .. } => 4,
            Error::Render { .. } => 5,
            Error::MissingColumn { .. } | Error::DuplicateLocale(_) | Error::Read { .. } | Error::Json(_) => 6,
        }
    }
}
