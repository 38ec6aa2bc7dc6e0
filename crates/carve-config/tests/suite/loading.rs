use std::io::Write;

use carve_config::{CarveConfig, ConfigError};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn loads_and_normalizes_from_path() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[refactorings]
disable = [" negate_boolean_literal ", "negate_boolean_literal"]
fail_loudly = true
"#
    )
    .expect("write config");

    let config = CarveConfig::load_from_path(file.path()).expect("config loads");
    assert_eq!(config.refactorings.disable, vec!["negate_boolean_literal"]);
    assert!(config.refactorings.fail_loudly);
    assert!(!config.refactorings.is_enabled("negate_boolean_literal"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("carve.toml");
    let err = CarveConfig::load_from_path(&path).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("carve.toml"));
}
