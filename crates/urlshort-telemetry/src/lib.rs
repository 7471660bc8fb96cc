//! Process-wide tracing setup shared by the urlshort binaries.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "urlshort=info,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("unknown log format '{0}', expected 'pretty' or 'json'")]
    UnknownFormat(String),
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to bridge `log` records: {0}")]
    Logger(#[from] tracing_log::log::SetLoggerError),
    #[error("a global subscriber is already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(DEFAULT_FILTER)?),
    }
}

/// Installs the global subscriber and routes `log` records into it.
///
/// Call once at startup; a second call fails.
pub fn init(format: LogFormat) -> Result<(), TelemetryError> {
    let filter = env_filter()?;

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(fmt::layer().pretty()), None),
        LogFormat::Json => (None, Some(fmt::layer().json().flatten_event(true))),
    };

    let subscriber = Registry::default().with(filter).with(pretty).with(json);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}
