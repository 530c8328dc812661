//! Tests for configuration loading.

use super::*;
use crate::QuoteStyle;
use std::io::Write;

#[test]
fn empty_config_uses_defaults() {
    let config = parse_config("{}").expect("empty object is a valid config");
    assert_eq!(config, EtmConfig::default());
    assert_eq!(config.printer.quote, QuoteStyle::Single);
    assert_eq!(config.printer.wrap_column, 100);
    assert_eq!(config.names.legacy_module, "ember-mocha");
    assert_eq!(config.names.render_helpers, vec!["render", "clearRender"]);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = parse_config(
        r#"{
            "names": { "legacyModule": "ember-qunit" },
            "printer": { "quote": "double" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.names.legacy_module, "ember-qunit");
    assert_eq!(config.names.setup_macro, "setupComponentTest");
    assert_eq!(config.printer.quote, QuoteStyle::Double);
    assert_eq!(config.printer.wrap_column, 100);
}

#[test]
fn wrap_column_accepts_numeric_strings() {
    let config = parse_config(r#"{ "printer": { "wrapColumn": "80" } }"#).unwrap();
    assert_eq!(config.printer.wrap_column, 80);

    let err = parse_config(r#"{ "printer": { "wrapColumn": "wide" } }"#).unwrap_err();
    assert!(
        format!("{err:#}").contains("invalid wrap column"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn identical_setup_names_are_rejected() {
    let err = parse_config(r#"{ "names": { "renderingSetup": "setupTest" } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("must differ"));
}

#[test]
fn load_config_reads_file_and_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "names": {{ "testKeyword": "test" }} }}"#).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.names.test_keyword, "test");

    let missing = file.path().with_extension("missing");
    let err = load_config(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"));
}

#[test]
fn lifecycle_hooks_are_listed_in_order() {
    let names = MigrationNames::default();
    assert_eq!(
        names.lifecycle_hooks(),
        ["before", "beforeEach", "afterEach", "after"]
    );
    assert!(names.is_render_helper("clearRender"));
    assert!(!names.is_render_helper("_element"));
}
