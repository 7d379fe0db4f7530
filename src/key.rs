//! Key parsing.
//!
//! Every row of a sheet is identified by a string key that encodes where the
//! string belongs and whether it is one variant of a plural:
//!
//! ```text
//! song_line__bottles_of_beer__pl_one
//! └──┬────┘  └──────┬──────┘ └──┬──┘
//!  group    identifier       quantity
//! ```
//!
//! - The group is the *shortest* prefix that leaves a valid identifier after
//!   a `_` or `__` separator. Multi-word groups therefore need `__`
//!   (`song_line__bottles`), while `main_title_long` splits as `main` /
//!   `title_long`.
//! - The identifier is made of alphanumeric runs joined by single `_`.
//!   Either side may be empty (`_title`, `main_`), but a separator is
//!   required.
//! - An optional `__pl_<quantity>` suffix marks a plural variant. The
//!   quantity must name one of the six CLDR categories. The suffix is found
//!   first, so an identifier introduced by `__` cannot start with `pl_`
//!   (`settings__pl_mode` is an unknown quantity `mode`).
//!
//! A plural key may omit the group (`items__pl_one`); the plain key then acts
//! as its own group and the identifier is empty.
//!
//! Parsing is a pure function of the input string.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// CLDR plural category carried by a `__pl_<quantity>` suffix.
///
/// The derived ordering follows the CLDR listing (`zero` first, `other`
/// last), which is also the order plural variants are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    /// Special treatment of 0 (Arabic, Latvian).
    Zero,
    /// Numbers like 1 (English), or ending in 1 but not 11 (Russian).
    One,
    /// Numbers like 2 (Welsh) or 102 (Slovenian).
    Two,
    /// "Small" numbers: 2-4 in Czech, numbers ending 2-4 but not 12-14 in Polish.
    Few,
    /// "Large" numbers, like those ending 11-99 in Maltese.
    Many,
    /// Everything without special treatment (all numbers in Chinese, 42 in English).
    Other,
}

impl Quantity {
    /// All categories in CLDR order.
    pub const ALL: [Quantity; 6] =
        [Quantity::Zero, Quantity::One, Quantity::Two, Quantity::Few, Quantity::Many, Quantity::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::ALL.into_iter().find(|q| q.as_str() == s).ok_or(())
    }
}

/// Why a key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("malformed key '{key}': expected <group>_<identifier> or <group>__<identifier>")]
    Malformed { key: String },
    #[error("unknown plural quantity '{quantity}' in key '{key}' (expected zero, one, two, few, many or other)")]
    UnknownQuantity { key: String, quantity: String },
}

/// A raw key decomposed into group, identifier and optional plural quantity.
///
/// `group + separator + identifier` is the plain key, and the plain key plus
/// `__pl_<quantity>` (when present) is the original input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    original: String,
    plain_key: String,
    group: String,
    separator: String,
    identifier: String,
    quantity: Option<Quantity>,
}

const PLURAL_MARKER: &str = "__pl_";

impl CompositeKey {
    /// Parse `key` against the key grammar.
    ///
    /// ```
    /// use sheetstrings::{CompositeKey, Quantity};
    ///
    /// let key = CompositeKey::parse("song_line__bottles_of_beer__pl_one").unwrap();
    /// assert_eq!(key.group(), "song_line");
    /// assert_eq!(key.identifier(), "bottles_of_beer");
    /// assert_eq!(key.plain_key(), "song_line__bottles_of_beer");
    /// assert_eq!(key.quantity(), Some(Quantity::One));
    /// ```
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let (plain, quantity) = match regex!(r"^(.*)__pl_(.*)$").captures(key) {
            Some(caps) => {
                let name = &caps[2];
                let quantity = name.parse::<Quantity>().map_err(|_| KeyError::UnknownQuantity {
                    key: key.to_string(),
                    quantity: name.to_string(),
                })?;
                (caps.get(1).map_or("", |m| m.as_str()), Some(quantity))
            }
            None => (key, None),
        };

        let grammar = regex!(r"^(.*?)(_{1,2})((?:[A-Za-z0-9]+_)*[A-Za-z0-9]*)$");
        let (group, separator, identifier) = match grammar.captures(plain) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string(), caps[3].to_string()),
            _ if quantity.is_some() && regex!(r"^[A-Za-z0-9]+$").is_match(plain) => {
                (plain.to_string(), String::new(), String::new())
            }
            _ => return Err(KeyError::Malformed { key: key.to_string() }),
        };

        Ok(CompositeKey {
            original: key.to_string(),
            plain_key: plain.to_string(),
            group,
            separator,
            identifier,
            quantity,
        })
    }

    /// The complete input key.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The key without its `__pl_<quantity>` suffix.
    pub fn plain_key(&self) -> &str {
        &self.plain_key
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// `_`, `__`, or empty for group-only plural keys.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn quantity(&self) -> Option<Quantity> {
        self.quantity
    }

    /// Whether this key names one variant of a plural.
    pub fn is_plural(&self) -> bool {
        self.quantity.is_some()
    }

    /// Reassemble the key from its parts.
    pub fn reassemble(&self) -> String {
        let mut out = format!("{}{}{}", self.group, self.separator, self.identifier);
        if let Some(q) = self.quantity {
            out.push_str(PLURAL_MARKER);
            out.push_str(q.as_str());
        }
        out
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
