//! Logging initialization.

use clap::ValueEnum;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// `level`.
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            fmt().json().with_env_filter(filter).init();
        }
        LogFormat::Pretty => {
            fmt().with_env_filter(filter).init();
        }
    }
}
