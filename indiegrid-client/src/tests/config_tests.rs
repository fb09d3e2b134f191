use super::*;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_both_fields_from_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
url = "https://api.indiegrid.example"
api_key = "anon-key"
"#,
    );
    let (backend, sources) = Backend::load_from(&path).unwrap();
    assert_eq!(backend.base_url, "https://api.indiegrid.example");
    assert_eq!(backend.api_key, "anon-key");
    assert_eq!(sources.base_url, ConfigSource::ConfigFile);
    assert_eq!(sources.api_key, ConfigSource::ConfigFile);
}

#[test]
fn trailing_slash_is_trimmed_from_the_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
url = "https://api.indiegrid.example/"
api_key = "anon-key"
"#,
    );
    let (backend, _) = Backend::load_from(&path).unwrap();
    assert_eq!(backend.base_url, "https://api.indiegrid.example");
}

#[test]
fn missing_url_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
api_key = "anon-key"
"#,
    );
    let err = Backend::load_from(&path).unwrap_err();
    assert!(matches!(err, ApiError::Config(_)), "got {err:?}");
}

#[test]
fn missing_file_reports_missing_sources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    let err = Backend::load_from(&path).unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[test]
fn save_preserves_the_other_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Backend::save_to(&path, Some("https://api.indiegrid.example"), None).unwrap();
    Backend::save_to(&path, None, Some("anon-key")).unwrap();

    let (backend, _) = Backend::load_from(&path).unwrap();
    assert_eq!(backend.base_url, "https://api.indiegrid.example");
    assert_eq!(backend.api_key, "anon-key");
}

#[test]
fn malformed_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "backend = 42");
    let err = Backend::load_from(&path).unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}
