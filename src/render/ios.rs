//! iOS strings, plural rules and Swift constants.
//!
//! Per locale this writes three files into `Base.lproj` (default locale) or
//! `<locale>.lproj`:
//!
//! - `Localizable.strings`: every entry, sectioned by group.
//! - `Localizable.stringsdict`: one plural-rule dictionary per plural group.
//! - `Strings.swift`: a `Strings` namespace with one nested struct per group
//!   and a constant per key, resolved through `NSLocalizedString` unless a
//!   custom closure is installed.

use super::{DEFAULT_LOCALE, Renderer, write_file};
use crate::builder::escape;
use crate::error::RenderError;
use crate::model::LocalizationModel;
use std::fmt::Write;
use std::path::PathBuf;

pub const TAG: &str = "ios";

#[derive(Debug, Clone)]
pub struct IosRenderer {
    output_dir: PathBuf,
}

impl IosRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        IosRenderer { output_dir: output_dir.into() }
    }

    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        if locale == DEFAULT_LOCALE {
            self.output_dir.join("Base.lproj")
        } else {
            self.output_dir.join(format!("{locale}.lproj"))
        }
    }
}

impl Renderer for IosRenderer {
    fn tag(&self) -> &'static str {
        TAG
    }

    /// `%s` -> `%@`, `%1$s` -> `%1$@`, and quotes escaped for the strings file.
    fn normalize(&self, value: &str) -> String {
        regex!(r"%(\d+\$)?s").replace_all(value, "%${1}@").replace('"', "\\\"")
    }

    fn export(&self, locale: &str, model: &LocalizationModel) -> Result<Vec<PathBuf>, RenderError> {
        let dir = self.locale_dir(locale);
        Ok(vec![
            write_file(&dir, "Localizable.strings", &render_strings(model)?)?,
            write_file(&dir, "Localizable.stringsdict", &render_stringsdict(model)?)?,
            write_file(&dir, "Strings.swift", &render_swift(model)?)?,
        ])
    }
}

pub(crate) fn render_strings(model: &LocalizationModel) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for header in &model.headers {
        writeln!(out, "/* {} */", block_comment(header))?;
    }
    for group in &model.groups {
        writeln!(out)?;
        writeln!(out, "/** {} **/", block_comment(&group.name))?;
        for entry in &group.entries {
            if let Some(comment) = &entry.comment {
                writeln!(out, "/* {} */", block_comment(comment))?;
            }
            writeln!(out, r#""{}" = "{}";"#, swift_literal(entry.key.original()), entry.value)?;
        }
    }
    Ok(out)
}

pub(crate) fn render_stringsdict(model: &LocalizationModel) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#
    )?;
    for header in &model.headers {
        writeln!(out, "<!-- {} -->", header.replace("--", "- -"))?;
    }
    writeln!(out, r#"<plist version="1.0">"#)?;
    writeln!(out, "<dict>")?;
    for plural in model.plurals.values() {
        let key = escape(&plural.key);
        writeln!(out, "    <key>{key}</key>")?;
        writeln!(out, "    <dict>")?;
        writeln!(out, "        <key>NSStringLocalizedFormatKey</key>")?;
        writeln!(out, "        <string>%#@{key}Key@</string>")?;
        writeln!(out, "        <key>{key}Key</key>")?;
        writeln!(out, "        <dict>")?;
        writeln!(out, "            <key>NSStringFormatSpecTypeKey</key>")?;
        writeln!(out, "            <string>NSStringPluralRuleType</string>")?;
        writeln!(out, "            <key>NSStringFormatValueTypeKey</key>")?;
        writeln!(out, "            <string>d</string>")?;
        for (quantity, entry) in &plural.values {
            writeln!(out, "            <key>{quantity}</key>")?;
            writeln!(out, "            <string>{}</string>", entry.value)?;
        }
        writeln!(out, "        </dict>")?;
        writeln!(out, "    </dict>")?;
    }
    writeln!(out, "</dict>")?;
    writeln!(out, "</plist>")?;
    Ok(out)
}

const SWIFT_LOCALIZED_HELPER: &str = r#"    // Setting this closure allows a custom localization provider,
    // such as an over-the-air service. By default NSLocalizedString loads
    // the strings from the main bundle's Localizable.strings file.
    public static var customLocalizationClosure: ((String, String?, Bundle, String, String) -> String)? = nil

    public static func localized(
        _ key: String, tableName: String? = nil, bundle: Bundle = Bundle.main, value: String, comment: String = ""
    ) -> String {
        if let closure = Strings.customLocalizationClosure {
            return closure(key, tableName, bundle, value, comment)
        } else {
            return NSLocalizedString(key, tableName: tableName, bundle: bundle, value: value, comment: comment)
        }
    }
"#;

pub(crate) fn render_swift(model: &LocalizationModel) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "import Foundation")?;
    writeln!(out)?;
    for header in &model.headers {
        writeln!(out, "// {header}")?;
    }
    writeln!(out)?;
    writeln!(out, "// swiftlint:disable line_length")?;
    writeln!(out, "public struct Strings {{")?;
    for group in &model.groups {
        writeln!(out, "    public struct {} {{", upper_camel(&group.name))?;
        for entry in &group.entries {
            let key = entry.key.original();
            let name = upper_camel(key);
            let literal = swift_literal(key);
            write!(out, r#"        static let {name} = Strings.localized("{literal}", value: "{}""#, entry.value)?;
            if let Some(comment) = &entry.comment {
                write!(out, r#", comment: "{}""#, swift_literal(comment))?;
            }
            writeln!(out, ")")?;
        }
        writeln!(out, "    }}")?;
        writeln!(out)?;
    }
    out.push_str(SWIFT_LOCALIZED_HELPER);
    writeln!(out, "}}")?;
    Ok(out)
}

/// `song_line__bottles_of_beer` -> `SongLineBottlesOfBeer`.
///
/// Names that would start with a digit get a leading `_` to stay valid Swift identifiers, and names
/// without any alphanumeric character become `Ungrouped`.
pub(crate) fn upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name.split(|c: char| !c.is_ascii_alphanumeric()).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() {
        out.push_str("Ungrouped");
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn block_comment(text: &str) -> String {
    text.replace("*/", "* /")
}

fn swift_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
