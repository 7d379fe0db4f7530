//! End-to-end exports: workbook JSON in, platform files on disk.

use chrono::DateTime;
use sheetstrings::{Error, ExportOptions, KeyError, Renderers, Workbook, export};
use std::fs;
use std::path::Path;

const WORKBOOK: &str = r#"{
    "spreadsheet_id": "abc",
    "sheets": [
        {
            "gid": 0,
            "title": "default",
            "values": [
                ["key", "value", "comment", "ios"],
                ["main_greeting", "Hello, %1$s!", "Shown on launch"],
                ["cart_items__pl_other", "%d items", "", ""],
                ["cart_items__pl_one", "1 item"],
                ["main_title", "Fish & Chips", "", "Fish and Chips"],
                ["", "row without key"]
            ]
        },
        {
            "gid": 42,
            "title": "de!A:D",
            "values": [
                ["key", "value"],
                ["main_greeting", "Hallo, %1$@!"]
            ]
        },
        { "gid": 7, "title": "fr" }
    ]
}"#;

fn options() -> ExportOptions {
    ExportOptions {
        generated_at: DateTime::parse_from_rfc3339("2013-02-12T04:30:00+00:00").unwrap(),
        ..ExportOptions::default()
    }
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref()).unwrap_or_else(|err| panic!("{}: {err}", path.as_ref().display()))
}

#[test]
fn exports_every_locale_for_every_target() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = Workbook::from_json(WORKBOOK).unwrap();
    let renderers = Renderers::standard(dir.path());

    let report = export(&workbook, &renderers, &["android", "ios"], &options()).unwrap();

    let exported: Vec<(&str, &str)> = report.summaries.iter().map(|s| (s.locale.as_str(), s.target)).collect();
    assert_eq!(exported, vec![("default", "android"), ("default", "ios"), ("de", "android"), ("de", "ios")]);
    assert_eq!(report.skipped, vec!["fr".to_string()]);

    let default_ios = &report.summaries[1];
    assert_eq!(default_ios.groups, 2);
    assert_eq!(default_ios.entries, 4);
    assert_eq!(default_ios.plurals, 1);
    assert_eq!(default_ios.overridden, 1);
    assert_eq!(default_ios.files.len(), 3);
    assert!(default_ios.files.iter().all(|f| f.exists()));
    assert_eq!(report.summaries[0].overridden, 0);

    let android = read(dir.path().join("values/generated_strings.xml"));
    assert!(android.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(android.contains(&format!("<!-- Generated by sheetstrings v{} -->", env!("CARGO_PKG_VERSION"))));
    assert!(android.contains("<!-- https://docs.google.com/spreadsheets/d/abc#gid=0 -->"));
    assert!(android.contains("<!-- Last updated at 2013-02-12T04:30:00+00:00 -->"));
    assert!(android.contains(r#"<string name="main_greeting">Hello, %1$s!</string>"#));
    assert!(android.contains(r#"<string name="main_title">Fish &amp; Chips</string>"#));
    assert!(android.contains(r#"<item quantity="one">@string/cart_items__pl_one</item>"#));
    assert!(!android.contains("row without key"));

    let android_de = read(dir.path().join("values-de/generated_strings.xml"));
    assert!(android_de.contains("#gid=42"));
    assert!(android_de.contains(r#"<string name="main_greeting">Hallo, %1$s!</string>"#));
    assert!(!android_de.contains("Plurals"));

    let strings = read(dir.path().join("Base.lproj/Localizable.strings"));
    assert!(strings.contains("/* Shown on launch */\n\"main_greeting\" = \"Hello, %1$@!\";"));
    assert!(strings.contains(r#""main_title" = "Fish and Chips";"#));

    let stringsdict = read(dir.path().join("Base.lproj/Localizable.stringsdict"));
    assert!(stringsdict.contains("<key>cart_items</key>"));
    assert!(stringsdict.contains("<string>%#@cart_itemsKey@</string>"));
    let one = stringsdict.find("<key>one</key>").unwrap();
    let other = stringsdict.find("<key>other</key>").unwrap();
    assert!(one < other, "plural variants are written in CLDR order");

    let swift = read(dir.path().join("Base.lproj/Strings.swift"));
    assert!(swift.contains("public struct Main {"));
    assert!(swift.contains(r#"static let MainGreeting = Strings.localized("main_greeting", value: "Hello, %1$@!""#));
    assert!(swift.contains("customLocalizationClosure"));

    assert!(dir.path().join("de.lproj/Localizable.strings").exists());
    assert!(!dir.path().join("values-fr").exists());
}

#[test]
fn single_target_writes_only_its_files() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = Workbook::from_json(WORKBOOK).unwrap();

    let report = export(&workbook, &Renderers::standard(dir.path()), &["android"], &options()).unwrap();

    assert_eq!(report.summaries.len(), 2);
    assert!(dir.path().join("values/generated_strings.xml").exists());
    assert!(!dir.path().join("Base.lproj").exists());
}

#[test]
fn custom_column_names() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = Workbook::from_json(
        r#"{ "sheets": [ { "gid": 3, "title": "default", "values": [["id", "text", "note"], ["main_ok", "OK", "button"]] } ] }"#,
    )
    .unwrap();
    let mut options = options();
    options.columns.key = "id".into();
    options.columns.value = "text".into();
    options.columns.comment = "note".into();

    export(&workbook, &Renderers::standard(dir.path()), &["android"], &options).unwrap();

    let android = read(dir.path().join("values/generated_strings.xml"));
    assert!(android.contains("<!-- sheet default (gid 3) -->"));
    assert!(android.contains("<!-- button -->\n    <string name=\"main_ok\">OK</string>"));
}

#[test]
fn urls_and_loose_keys_export_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = Workbook::from_json(
        r#"{ "sheets": [ { "gid": 0, "title": "default", "values": [
            ["key", "value"],
            ["main_help", "See https://example.com/help or 1/2"],
            ["main_", "Main"],
            ["_title", "Title"]
        ] } ] }"#,
    )
    .unwrap();

    let report = export(&workbook, &Renderers::standard(dir.path()), &["android", "ios"], &options()).unwrap();
    assert_eq!(report.summaries[0].entries, 3);

    let android = read(dir.path().join("values/generated_strings.xml"));
    assert!(android.contains(r#"<string name="main_help">See https://example.com/help or 1/2</string>"#));
    assert!(android.contains(r#"<string name="main_">Main</string>"#));
    assert!(android.contains(r#"<string name="_title">Title</string>"#));

    let strings = read(dir.path().join("Base.lproj/Localizable.strings"));
    assert!(strings.contains(r#""main_help" = "See https://example.com/help or 1/2";"#));
    assert!(strings.contains(r#""_title" = "Title";"#));
}

fn failing(rows: &str) -> (Error, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let json = format!(r#"{{ "sheets": [ {{ "gid": 0, "title": "default", "values": {rows} }} ] }}"#);
    let workbook = Workbook::from_json(&json).unwrap();
    let err = export(&workbook, &Renderers::standard(dir.path()), &["android", "ios"], &options()).unwrap_err();
    (err, dir)
}

#[test]
fn malformed_key_aborts_before_writing() {
    let (err, dir) = failing(r#"[["key", "value"], ["main_ok", "OK"], ["greeting", "Hi"]]"#);

    assert!(matches!(&err, Error::Key { row: 3, source: KeyError::Malformed { key }, .. } if key == "greeting"));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unknown_quantity_aborts() {
    let (err, _dir) = failing(r#"[["key", "value"], ["key__pl_xyz", "?"]]"#);

    assert!(matches!(&err, Error::Key { source: KeyError::UnknownQuantity { quantity, .. }, .. } if quantity == "xyz"));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn missing_key_column_aborts() {
    let (err, _dir) = failing(r#"[["name", "value"], ["main_ok", "OK"]]"#);

    assert!(matches!(&err, Error::MissingColumn { column, .. } if column == "key"));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn unreadable_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = Workbook::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert_eq!(err.exit_code(), 6);
}
