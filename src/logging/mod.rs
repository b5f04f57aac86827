//! Logging initialization with environment-based formatters
//!
//! - Production: structured JSON logs for log aggregation
//! - Anything else: colorful, human-readable logs
//!
//! `LOG_FORMAT=json|pretty` overrides the environment default and
//! `RUST_LOG` controls filtering (default `info`).

use crate::config::{get_environment, is_production};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_environment(environment: &str, override_format: Option<&str>) -> Self {
        match override_format.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("text") => LogFormat::Pretty,
            _ if is_production(environment) => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Initialize logging for the current environment
pub fn init_logging() {
    let format = LogFormat::for_environment(
        &get_environment(),
        std::env::var("LOG_FORMAT").ok().as_deref(),
    );
    init_logging_with(format);
}

pub fn init_logging_with(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}
