//! Configuration loading tests
//!
//! These touch process-wide environment variables, so they run serially.

use std::path::PathBuf;

use marketsquare::shared::config::{ENV_API_URL, ENV_DB_PATH};
use marketsquare::shared::{AppConfig, AppConfigBuilder, ConfigError};
use serial_test::serial;

struct EnvGuard(&'static [&'static str]);

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in self.0 {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let _guard = EnvGuard(&[ENV_API_URL, ENV_DB_PATH]);
    std::env::set_var(ENV_API_URL, "http://127.0.0.1:4000/api/");
    std::env::set_var(ENV_DB_PATH, "/tmp/marketsquare-test/session.db");

    let config = AppConfigBuilder::from_toml_str(
        r#"
        server_url = "https://file.example.com/api"
        log_filter = "marketsquare=trace"
        "#,
    )
    .expect("valid toml")
    .with_env()
    .build()
    .expect("valid config");

    assert_eq!(config.server_url, "http://127.0.0.1:4000/api");
    assert_eq!(
        config.storage_path,
        PathBuf::from("/tmp/marketsquare-test/session.db")
    );
    assert_eq!(config.log_filter, "marketsquare=trace");
}

#[test]
#[serial]
fn test_invalid_env_url_is_rejected() {
    let _guard = EnvGuard(&[ENV_API_URL]);
    std::env::set_var(ENV_API_URL, "localhost:4000");

    let result = AppConfig::builder().with_env().build();
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
}

#[test]
#[serial]
fn test_config_file_on_disk() {
    let _guard = EnvGuard(&[ENV_API_URL, ENV_DB_PATH]);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "server_url = \"http://shop.local/api\"\n").expect("write config");

    let config = AppConfigBuilder::from_file(&path)
        .expect("readable")
        .with_env()
        .build()
        .expect("valid config");
    assert_eq!(config.server_url, "http://shop.local/api");

    let missing = AppConfigBuilder::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}
