// tests/config_test.rs
use git_bump::config::{load_config, AuthConfig, Config};
use git_bump::BumpError;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.remote, "origin");
    assert_eq!(config.initial_version, "v0.1.0");
    assert_eq!(config.auth.username, None);
    assert_eq!(config.auth.password_env, "GIT_BUMP_PASSWORD");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
initial_version = "1.0.0"

[auth]
username = "ci-bot"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.initial_version, "1.0.0");
    assert_eq!(config.auth.username.as_deref(), Some("ci-bot"));
    assert_eq!(config.auth.password_env, "GIT_BUMP_PASSWORD");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let config = Config::from_toml("remote = \"mirror\"\n").unwrap();
    assert_eq!(config.remote, "mirror");
    assert_eq!(config.initial_version, "v0.1.0");
    assert_eq!(config.auth, AuthConfig::default());
}

#[test]
fn test_invalid_initial_version_is_rejected() {
    let err = Config::from_toml("initial_version = \"first\"\n").unwrap_err();
    assert!(matches!(err, BumpError::Config(_)));
    assert!(err.to_string().contains("initial_version"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = Config::from_toml("remote = [").unwrap_err();
    assert!(matches!(err, BumpError::Config(_)));
}

#[test]
fn test_unreadable_file_is_io_error() {
    let err = load_config(Some("does/not/exist/gitbump.toml")).unwrap_err();
    match err {
        BumpError::Io(e) => {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            assert!(e.to_string().contains("does/not/exist/gitbump.toml"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
#[serial]
fn test_password_comes_from_environment() {
    let auth = AuthConfig {
        username: None,
        password_env: "GIT_BUMP_TEST_PASSWORD".to_string(),
    };

    std::env::remove_var("GIT_BUMP_TEST_PASSWORD");
    assert_eq!(auth.password(), "");

    std::env::set_var("GIT_BUMP_TEST_PASSWORD", "s3cret");
    assert_eq!(auth.password(), "s3cret");
    std::env::remove_var("GIT_BUMP_TEST_PASSWORD");
}
