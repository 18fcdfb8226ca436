//! Tracing/logging initialization.
//!
//! Configuration comes from the environment:
//! - `CATALOG_LOG` (falls back to `RUST_LOG`, then `info`): filter directives
//! - `CATALOG_LOG_FORMAT`: `json` (default), `pretty` or `text`

use core::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const FILTER_VAR: &str = "CATALOG_LOG";
const FORMAT_VAR: &str = "CATALOG_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Text,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format: {0}")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "text" | "plain" => Ok(Self::Text),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
    /// Set when `CATALOG_LOG_FORMAT` held an unknown value; reported by [`init`].
    pub rejected_format: Option<UnknownLogFormat>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            rejected_format: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup(FILTER_VAR)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let (format, rejected_format) =
            match lookup(FORMAT_VAR).map(|raw| raw.parse::<LogFormat>()) {
                None => (LogFormat::default(), None),
                Some(Ok(format)) => (format, None),
                Some(Err(err)) => (LogFormat::default(), Some(err)),
            };

        Self {
            filter,
            format,
            rejected_format,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &LogConfig) {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if let Some(err) = &config.rejected_format {
        ::tracing::warn!(error = %err, "falling back to json log format");
    }
}
