//! Unit tests for configuration

use airwatch::config::{is_production, ModelConfig, ServerConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_model_config_defaults() {
    let config = ModelConfig::from_lookup(lookup(&[]));
    assert_eq!(config, ModelConfig::default());
    assert_eq!(
        config.model_path(),
        PathBuf::from("ml_models").join("random_forest_model.json")
    );
    assert!(config.model_url.is_none());
    assert_eq!(config.load_delay, Duration::from_secs(1));
}

#[test]
fn test_model_config_overrides() {
    let config = ModelConfig::from_lookup(lookup(&[
        ("MODEL_DIR", "/srv/models"),
        ("MODEL_FILENAME", "forest.json"),
        ("AQI_MODEL_URL", "  https://example.com/forest.json "),
        ("MODEL_LOAD_DELAY_SECONDS", "5"),
        ("MODEL_DOWNLOAD_TIMEOUT_SECONDS", "not-a-number"),
        ("MODEL_DOWNLOAD_RETRIES", "1"),
    ]));

    assert_eq!(config.model_path(), PathBuf::from("/srv/models/forest.json"));
    assert_eq!(config.model_url.as_deref(), Some("https://example.com/forest.json"));
    assert_eq!(config.load_delay, Duration::from_secs(5));
    assert_eq!(config.download_timeout, Duration::from_secs(60));
    assert_eq!(config.download_retries, 1);
}

#[test]
fn test_blank_model_url_is_ignored() {
    let config = ModelConfig::from_lookup(lookup(&[("AQI_MODEL_URL", "   ")]));
    assert!(config.model_url.is_none());
}

#[test]
fn test_server_config() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", "9000"), ("ENVIRONMENT", "production")]));
    assert_eq!(config.port, 9000);
    assert_eq!(config.environment, "production");
    assert!(is_production(&config.environment));

    let config = ServerConfig::from_lookup(lookup(&[]));
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "sandbox");
    assert!(!is_production(&config.environment));
}
