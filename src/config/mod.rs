//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Deployment environment (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Where the model artifact lives and how to fetch it
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_dir: PathBuf,
    pub model_filename: String,
    /// Remote artifact, downloaded when the local file is missing
    pub model_url: Option<String>,
    pub load_delay: Duration,
    pub download_timeout: Duration,
    pub download_retries: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("ml_models"),
            model_filename: "random_forest_model.json".to_string(),
            model_url: None,
            load_delay: Duration::from_secs(1),
            download_timeout: Duration::from_secs(60),
            download_retries: 3,
        }
    }
}

impl ModelConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_dir: lookup("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            model_filename: lookup("MODEL_FILENAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.model_filename),
            model_url: lookup("AQI_MODEL_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            load_delay: Duration::from_secs(parse_or(
                lookup("MODEL_LOAD_DELAY_SECONDS"),
                defaults.load_delay.as_secs(),
            )),
            download_timeout: Duration::from_secs(parse_or(
                lookup("MODEL_DOWNLOAD_TIMEOUT_SECONDS"),
                defaults.download_timeout.as_secs(),
            )),
            download_retries: parse_or(lookup("MODEL_DOWNLOAD_RETRIES"), defaults.download_retries),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_filename)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    pub model: ModelConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parse_or(lookup("PORT"), 8080),
            environment: lookup("APP_ENV")
                .or_else(|| lookup("ENVIRONMENT"))
                .unwrap_or_else(|| "sandbox".to_string()),
            model: ModelConfig::from_lookup(&lookup),
        }
    }
}
