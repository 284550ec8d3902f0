// Tests for configuration loading

use anyhow::Result;
use brainwave::config::{Config, UpstreamConfig};
use std::fs;
use tempfile::TempDir;

const SAMPLE_CONFIG: &str = r#"
[service]
name = "brainwave"

[service.http]
bind = "127.0.0.1"
port = 3000

[recognition]
provider = "mock"
language = "en-US"

[upstream]
base_url = "https://api.deepseek.com"
model = "deepseek-chat"
api_key_env = "DEEPSEEK_API_KEY"
timeout_secs = 30
"#;

#[test]
fn test_load_config_from_toml() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("brainwave.toml");
    fs::write(&path, SAMPLE_CONFIG)?;

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.name, "brainwave");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 3000);
    assert_eq!(cfg.recognition.provider, "mock");
    assert_eq!(cfg.recognition.language, "en-US");
    assert_eq!(cfg.upstream.base_url, "https://api.deepseek.com");
    assert_eq!(cfg.upstream.model, "deepseek-chat");
    assert_eq!(cfg.upstream.api_key_env, "DEEPSEEK_API_KEY");
    assert_eq!(cfg.upstream.timeout_secs, 30);

    Ok(())
}

#[test]
fn test_load_missing_config_fails() {
    assert!(Config::load("does/not/exist").is_err());
}

#[test]
fn test_upstream_defaults() {
    let upstream = UpstreamConfig::default();

    assert_eq!(upstream.base_url, "https://api.deepseek.com");
    assert_eq!(upstream.model, "deepseek-chat");
    assert_eq!(upstream.api_key_env, "DEEPSEEK_API_KEY");
    assert_eq!(upstream.timeout_secs, 30);
}
