//! Tests for the layered configuration system.

use cms_architect_config::ArchitectConfig;
use std::io::Write;
use tempfile::Builder;

#[test]
fn test_bundled_defaults() {
    let config = ArchitectConfig::bundled().unwrap();

    assert_eq!(config.provider.name, "gemini");
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert_eq!(
        config.provider.api_key_vars,
        vec!["GEMINI_API_KEY".to_string(), "API_KEY".to_string()]
    );
    assert_eq!(config.provider.request_timeout().as_secs(), 120);
    assert_eq!(config.provider.temperature, None);
    assert_eq!(config.session.history_cap(), Some(40));
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert_eq!(config.tui.tick_rate_ms, 250);
}

#[test]
fn test_file_overrides_only_named_keys() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[provider]
model = "gemini-2.5-pro"
temperature = 0.4

[session]
max_history_messages = 0
"#
    )
    .unwrap();

    let config = ArchitectConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config.provider.model, "gemini-2.5-pro");
    assert_eq!(config.provider.temperature, Some(0.4));
    assert_eq!(config.provider.request_timeout_secs, 120);
    assert_eq!(config.session.history_cap(), None);
    assert_eq!(config.tui.tick_rate_ms, 250);
}

#[test]
fn test_unsupported_provider_is_rejected() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(temp_file, "[provider]\nname = \"openai\"").unwrap();

    let err = ArchitectConfig::from_file(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Unsupported provider"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(temp_file, "[provider]\nrequest_timeout_secs = 0").unwrap();

    assert!(ArchitectConfig::from_file(temp_file.path()).is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = ArchitectConfig::load_with(Some(std::path::Path::new(
        "/definitely/not/here/cms_architect.toml",
    )));
    assert!(result.is_err());
}

#[test]
fn test_unset_key_variables_yield_no_key() {
    let mut config = ArchitectConfig::bundled().unwrap();
    config.provider.api_key_vars = vec!["CMS_ARCHITECT_TEST_KEY_THAT_IS_NEVER_SET".to_string()];
    assert_eq!(config.provider.api_key(), None);
}

#[test]
fn test_explicit_log_file_wins() {
    let mut config = ArchitectConfig::bundled().unwrap();
    assert!(config.logging.log_file().ends_with("cms_architect.log"));

    config.logging.file = Some("/tmp/custom.log".into());
    assert_eq!(config.logging.log_file(), std::path::PathBuf::from("/tmp/custom.log"));
}
