//! Tests for configuration loading.

use std::io::Write;
use uploadpost::{ConfigErrorKind, PollSettings, UploadPostConfig};

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url = "http://localhost:8080/api"
api_key = "file-key"

[polling]
interval_seconds = 3
"#
    )
    .unwrap();

    let config = UploadPostConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base_url(), "http://localhost:8080/api");
    assert_eq!(config.credentials().unwrap().api_key(), "file-key");
    assert_eq!(*config.polling().interval_seconds(), 3);
    assert_eq!(*config.polling().timeout_seconds(), 600);
    assert_eq!(*config.request_timeout_seconds(), 120);

    let settings: PollSettings = (*config.polling()).into();
    assert_eq!(settings, PollSettings::new(3, 600));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let err = UploadPostConfig::load(Some(std::path::Path::new("/no/such/uploadpost.toml")))
        .unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::Read { path, .. } if path.ends_with("uploadpost.toml")));
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let err = UploadPostConfig::parse("base_url = [").unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::InvalidToml(_)));
}

#[test]
fn test_blank_api_key_is_missing() {
    let config = UploadPostConfig::parse(r#"api_key = "   ""#).unwrap();
    assert!(config.credentials().is_err());
    assert!(config.client().is_err());
}
