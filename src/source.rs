//! Workbook input.
//!
//! The spreadsheet service is not called directly; the tool reads a JSON
//! document shaped like a values export of every sheet:
//!
//! ```json
//! {
//!   "spreadsheet_id": "1upHiDHWu5m30tYdhMDP4GXheOWUE4r3VrHfmAUXiuyI",
//!   "sheets": [
//!     { "gid": 0, "title": "default", "values": [["key", "value"], ["main_title", "Hello"]] }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// One spreadsheet cell. Exports may carry numbers, booleans or nulls next to text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    #[default]
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// One sheet of the workbook: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSheet {
    #[serde(default)]
    pub gid: Cell,
    /// Sheet title, optionally with an A1 range (`de!A:M`).
    pub title: String,
    #[serde(default)]
    pub values: Vec<Vec<Cell>>,
}

impl RawSheet {
    /// The title without any range suffix.
    pub fn locale(&self) -> &str {
        self.title.split_once('!').map_or(self.title.as_str(), |(locale, _)| locale).trim()
    }

    pub fn gid(&self) -> String {
        self.gid.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    pub sheets: Vec<RawSheet>,
}

impl Workbook {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        Workbook::from_json(&json)
    }

    /// Where `sheet` came from, as written into generated file headers.
    pub fn source_line(&self, sheet: &RawSheet) -> String {
        match &self.spreadsheet_id {
            Some(id) => format!("https://docs.google.com/spreadsheets/d/{id}#gid={}", sheet.gid()),
            None => format!("sheet {} (gid {})", sheet.locale(), sheet.gid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_mixed_cells() {
        let workbook = Workbook::from_json(
            r#"{
                "spreadsheet_id": "abc",
                "sheets": [
                    { "gid": 1234, "title": "de!A:M", "values": [["key", "value"], ["main_count", 3], ["main_flag", true, null]] },
                    { "title": "default" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(workbook.sheets.len(), 2);
        let de = &workbook.sheets[0];
        assert_eq!(de.locale(), "de");
        assert_eq!(de.gid(), "1234");
        let row: Vec<String> = de.values[2].iter().map(Cell::to_string).collect();
        assert_eq!(row, vec!["main_flag", "true", ""]);
        assert_eq!(de.values[1][1].to_string(), "3");

        let default = &workbook.sheets[1];
        assert_eq!(default.locale(), "default");
        assert!(default.values.is_empty());
        assert_eq!(default.gid(), "");
    }

    #[test]
    fn source_line_prefers_spreadsheet_url() {
        let sheet = RawSheet { gid: Cell::from("0"), title: "default".into(), values: vec![] };
        let mut workbook = Workbook { spreadsheet_id: Some("abc".into()), sheets: vec![sheet.clone()] };
        assert_eq!(workbook.source_line(&sheet), "https://docs.google.com/spreadsheets/d/abc#gid=0");

        workbook.spreadsheet_id = None;
        assert_eq!(workbook.source_line(&sheet), "sheet default (gid 0)");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Workbook::from_json("{ \"sheets\": 3 }").unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
