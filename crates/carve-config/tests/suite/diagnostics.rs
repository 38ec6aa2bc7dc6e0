use carve_config::{CarveConfig, ConfigWarning};
use pretty_assertions::assert_eq;

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
typo = 1

[refactorings]
disabel = ["add_braces"]

[logging]
levle = "debug"
"#;

    let (_config, diagnostics) =
        CarveConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.unknown_keys,
        vec!["logging.levle", "refactorings.disabel", "typo"]
    );
}

#[test]
fn clean_config_has_no_diagnostics() {
    let text = r#"
[refactorings]
disable = ["wrap_in_*"]

[logging]
level = "debug"
json = true
"#;

    let (config, diagnostics) =
        CarveConfig::load_from_str_with_diagnostics(text).expect("config should parse");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(config.logging.json);
    assert!(!config.refactorings.is_enabled("wrap_in_condition"));
    assert!(config.refactorings.is_enabled("add_braces"));
}

#[test]
fn reports_invalid_logging_level() {
    let text = r#"
[logging]
level = "carve=loud[["
"#;

    let (_config, diagnostics) =
        CarveConfig::load_from_str_with_diagnostics(text).expect("config should parse");
    assert!(matches!(
        diagnostics.warnings.as_slice(),
        [ConfigWarning::LoggingLevelInvalid { value, .. }] if value == "carve=loud[["
    ));
}

#[test]
fn type_errors_are_fatal() {
    let err = CarveConfig::load_from_str_with_diagnostics("[refactorings]\nenabled = \"yes\"\n")
        .expect_err("wrong type should fail");
    assert!(err.to_string().starts_with("failed to parse toml config"));
}
