//! The localization model handed to renderers.
//!
//! `LocalizedEntry` is what a sheet row parses into. The builder turns a
//! locale's entries into a `LocalizationModel`: groups of `ResolvedEntry`
//! values (the value a renderer writes, after override lookup, normalization
//! and escaping) plus plural groups that point at the same resolved entries.

use crate::key::{CompositeKey, Quantity};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One sheet row: its parsed key, primary value, comment and every raw cell
/// (for override-column lookup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    pub key: CompositeKey,
    pub value: String,
    pub comment: Option<String>,
    /// All cells of the row, in column order.
    pub entries: Vec<String>,
}

impl LocalizedEntry {
    /// The cell at `column`, or `None` when the row is shorter or the cell is empty.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.entries.get(column).map(String::as_str).filter(|c| !c.is_empty())
    }
}

/// An entry ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub key: CompositeKey,
    /// Override cell verbatim, or the normalized and escaped primary value.
    pub value: String,
    pub comment: Option<String>,
    /// Whether `value` came from the platform override column.
    pub overridden: bool,
}

/// Entries sharing a key group, in sorted key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<Arc<ResolvedEntry>>,
}

/// Variants of one pluralizable string, indexed by quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralGroup {
    /// The shared plain key of every variant.
    pub key: String,
    pub values: BTreeMap<Quantity, Arc<ResolvedEntry>>,
}

impl PluralGroup {
    pub fn new(key: impl Into<String>) -> Self {
        PluralGroup { key: key.into(), values: BTreeMap::new() }
    }

    /// Quantities present, in CLDR order.
    pub fn quantities(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.values.keys().copied()
    }

    pub fn get(&self, quantity: Quantity) -> Option<&ResolvedEntry> {
        self.values.get(&quantity).map(Arc::as_ref)
    }
}

/// Everything a renderer needs for one (locale, platform) pair.
///
/// Built once by [`crate::build_model`] and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationModel {
    /// Provenance lines, written verbatim as comments at the top of each file.
    pub headers: Vec<String>,
    /// Groups in first-seen order of the sorted keys.
    pub groups: Vec<Group>,
    /// Plural groups by plain key.
    pub plurals: BTreeMap<String, PluralGroup>,
}

impl LocalizationModel {
    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Look up a resolved entry by its original key.
    pub fn entry(&self, key: &str) -> Option<&ResolvedEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter()).find(|e| e.key.original() == key).map(Arc::as_ref)
    }
}
