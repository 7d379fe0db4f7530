//! Model building.
//!
//! Turns the parsed entries of one locale into the [`LocalizationModel`] for
//! one renderer:
//!
//! ```text
//! entries ── sort by original key ──▶ sweep
//!                                      ├─ resolve value (override | normalize + escape)
//!                                      ├─ append to the entry's group
//!                                      └─ plural key? ──▶ plural group slot
//! ```
//!
//! Sorting comes first: it fixes the order of groups, of entries inside a
//! group and of duplicate keys, so the same input always yields the same
//! model. A group that reappears after another group's run (`a_a`, `a_b__c`,
//! `a_c`) is merged into its first occurrence, so group names stay unique.

use crate::model::{Group, LocalizationModel, LocalizedEntry, PluralGroup, ResolvedEntry};
use crate::render::Renderer;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Build the model for `renderer` from one locale's entries.
///
/// `override_column` is the index of the column named after the renderer's
/// tag, if the sheet has one. `headers` are copied into the model verbatim.
pub fn build_model(
    entries: &[LocalizedEntry],
    renderer: &dyn Renderer,
    override_column: Option<usize>,
    headers: &[String],
) -> LocalizationModel {
    let mut sorted: Vec<&LocalizedEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.key.original().cmp(b.key.original()));

    let mut groups: Vec<Group> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut plurals: BTreeMap<String, PluralGroup> = BTreeMap::new();
    let mut previous_key: Option<&str> = None;

    for entry in sorted {
        let key = &entry.key;
        if previous_key == Some(key.original()) {
            tracing::warn!(key = key.original(), "duplicate key, both rows are kept");
        }
        previous_key = Some(key.original());

        let resolved = Arc::new(resolve_entry(entry, renderer, override_column));

        let open = groups.last().is_some_and(|g| g.name == key.group());
        if open {
            if let Some(group) = groups.last_mut() {
                group.entries.push(Arc::clone(&resolved));
            }
        } else if let Some(&idx) = group_index.get(key.group()) {
            tracing::debug!(group = key.group(), key = key.original(), "merging into earlier group");
            groups[idx].entries.push(Arc::clone(&resolved));
        } else {
            group_index.insert(key.group(), groups.len());
            groups.push(Group { name: key.group().to_string(), entries: vec![Arc::clone(&resolved)] });
        }

        if let Some(quantity) = key.quantity() {
            let plural =
                plurals.entry(key.plain_key().to_string()).or_insert_with(|| PluralGroup::new(key.plain_key()));
            if plural.values.insert(quantity, resolved).is_some() {
                tracing::warn!(
                    key = key.plain_key(),
                    quantity = quantity.as_str(),
                    "duplicate plural quantity, the later row wins"
                );
            }
        }
    }

    tracing::debug!(
        renderer = renderer.tag(),
        groups = groups.len(),
        plurals = plurals.len(),
        "built localization model"
    );

    LocalizationModel { headers: headers.to_vec(), groups, plurals }
}

/// Resolve the output value of a single entry.
pub fn resolve_entry(entry: &LocalizedEntry, renderer: &dyn Renderer, override_column: Option<usize>) -> ResolvedEntry {
    let (value, overridden) = match override_column.and_then(|column| entry.cell(column)) {
        Some(raw) => (raw.to_string(), true),
        None => (escape(&renderer.normalize(&entry.value)), false),
    };
    ResolvedEntry { key: entry.key.clone(), value, comment: entry.comment.clone(), overridden }
}

/// HTML-entity escaping of `&`, `<`, `>`, `'` and `"`. Everything else is kept.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}
