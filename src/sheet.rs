//! Sheet parsing: header row to column map, data rows to [`LocalizedEntry`].

use crate::error::{Error, Result};
use crate::key::CompositeKey;
use crate::model::LocalizedEntry;
use crate::source::{Cell, RawSheet};
use std::collections::HashMap;

/// Names of the columns holding key, value and comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub key: String,
    pub value: String,
    pub comment: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames { key: "key".into(), value: "value".into(), comment: "comment".into() }
    }
}

/// Column name -> index, from a header row. The first column with a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    by_name: HashMap<String, usize>,
}

impl Columns {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut by_name = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            by_name.entry(name.as_ref().trim().to_string()).or_insert(idx);
        }
        Columns { by_name }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

/// A parsed locale sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub gid: String,
    pub locale: String,
    pub columns: Columns,
    /// Entries in row order.
    pub entries: Vec<LocalizedEntry>,
}

impl Sheet {
    /// Parse every data row of `raw`.
    ///
    /// Rows with an empty key are skipped. The first key that fails to parse
    /// fails the whole sheet.
    pub fn parse(raw: &RawSheet, names: &ColumnNames) -> Result<Sheet> {
        let locale = raw.locale().to_string();
        let header: Vec<String> =
            raw.values.first().map(|row| row.iter().map(Cell::to_string).collect()).unwrap_or_default();
        let columns = Columns::from_header(&header);

        let key_column = columns
            .index(&names.key)
            .ok_or_else(|| Error::MissingColumn { locale: locale.clone(), column: names.key.clone() })?;
        let value_column = columns.index(&names.value);
        let comment_column = columns.index(&names.comment);

        let mut entries = Vec::with_capacity(raw.values.len().saturating_sub(1));
        for (idx, row) in raw.values.iter().enumerate().skip(1) {
            let cells: Vec<String> = row.iter().map(Cell::to_string).collect();
            let key = cell(&cells, Some(key_column)).trim();
            if key.is_empty() {
                continue;
            }

            let key = CompositeKey::parse(key).map_err(|source| Error::Key {
                locale: locale.clone(),
                row: idx + 1,
                source,
            })?;
            let comment = cell(&cells, comment_column);

            entries.push(LocalizedEntry {
                key,
                value: cell(&cells, value_column).to_string(),
                comment: (!comment.is_empty()).then(|| comment.to_string()),
                entries: cells,
            });
        }

        tracing::info!(locale = %locale, gid = %raw.gid(), entries = entries.len(), "parsed sheet");
        Ok(Sheet { gid: raw.gid(), locale, columns, entries })
    }

    /// Index of the override column for the renderer tagged `tag`.
    pub fn override_column(&self, tag: &str) -> Option<usize> {
        self.columns.index(tag)
    }
}

fn cell(cells: &[String], column: Option<usize>) -> &str {
    column.and_then(|c| cells.get(c)).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyError;

    fn raw(rows: Vec<Vec<&str>>) -> RawSheet {
        RawSheet {
            gid: Cell::from("7"),
            title: "de".into(),
            values: rows.into_iter().map(|row| row.into_iter().map(Cell::from).collect()).collect(),
        }
    }

    #[test]
    fn parses_rows_into_entries() {
        let sheet = Sheet::parse(
            &raw(vec![
                vec!["key", "value", "android", "ios", "comment"],
                vec!["main_title", "Titel", "", "", "Screen title"],
                vec!["", "orphan value"],
                vec!["  "],
                vec!["cart_items__pl_one", "1 Artikel", "1 <b>Artikel</b>"],
            ]),
            &ColumnNames::default(),
        )
        .unwrap();

        assert_eq!(sheet.locale, "de");
        assert_eq!(sheet.gid, "7");
        assert_eq!(sheet.entries.len(), 2);

        let title = &sheet.entries[0];
        assert_eq!(title.key.original(), "main_title");
        assert_eq!(title.value, "Titel");
        assert_eq!(title.comment.as_deref(), Some("Screen title"));
        assert_eq!(title.entries.len(), 5);

        let items = &sheet.entries[1];
        assert_eq!(items.comment, None);
        assert_eq!(items.entries, vec!["cart_items__pl_one", "1 Artikel", "1 <b>Artikel</b>"]);

        assert_eq!(sheet.override_column("android"), Some(2));
        assert_eq!(sheet.override_column("ios"), Some(3));
        assert_eq!(sheet.override_column("web"), None);
    }

    #[test]
    fn custom_column_names() {
        let names = ColumnNames { key: "id".into(), value: "text".into(), comment: "note".into() };
        let sheet = Sheet::parse(&raw(vec![vec!["text", "id"], vec!["Hallo", "main_hello"]]), &names).unwrap();
        assert_eq!(sheet.entries[0].key.original(), "main_hello");
        assert_eq!(sheet.entries[0].value, "Hallo");
    }

    #[test]
    fn missing_key_column_fails() {
        let err = Sheet::parse(&raw(vec![vec!["name", "value"]]), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "key"));
    }

    #[test]
    fn bad_key_fails_the_sheet_with_its_row() {
        let err = Sheet::parse(
            &raw(vec![vec!["key", "value"], vec!["main_ok", "fine"], vec!["key__pl_xyz", "broken"]]),
            &ColumnNames::default(),
        )
        .unwrap_err();

        match err {
            Error::Key { locale, row, source } => {
                assert_eq!(locale, "de");
                assert_eq!(row, 3);
                assert_eq!(source, KeyError::UnknownQuantity { key: "key__pl_xyz".into(), quantity: "xyz".into() });
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
