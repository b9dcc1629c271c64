//! Tests for configuration loading

use std::time::Duration;

use dawnkeep::config::Config;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert!(config.proxy.enabled);
    assert_eq!(config.scheduler.max_attempts, 5);
}

#[test]
fn test_config_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dawnkeep.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "http://localhost:9000"
request_timeout_secs = 30

[proxy]
file = "private-proxies.txt"
remote_url = "https://example.com/proxies.txt"
enabled = true

[scheduler]
poll_interval_secs = 120
max_attempts = 3
retry_delay_secs = 1

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.validate().is_ok());

    assert_eq!(config.api.base_url, "http://localhost:9000");
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.proxy.file.to_str().unwrap(), "private-proxies.txt");
    assert_eq!(
        config.proxy.remote_url.as_deref(),
        Some("https://example.com/proxies.txt")
    );
    assert_eq!(config.poll_interval(), Duration::from_secs(120));

    let policy = config.retry_policy();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.retry_delay, Duration::from_secs(1));

    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_config_rejects_broken_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dawnkeep.toml");
    std::fs::write(&path, "this is not toml [").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let mut config = Config::default();
    config.api.base_url = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.api.request_timeout_secs = 0;
    assert!(config.validate().is_err());
}
