use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt as layer, prelude::*};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable colored output
    #[default]
    Pretty,
    /// Structured JSON lines
    Json,
    /// Minimal text output
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown log format `{0}`, expected pretty, json or compact")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides `level` when set. Logs go to stderr so they never mix
/// with payloads printed on stdout. Calling this twice is a no-op.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(layer::layer().json().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(layer::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(layer::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(err) = result {
        tracing::debug!(%err, "tracing already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formats() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing("debug", LogFormat::Compact);
        init_tracing("debug", LogFormat::Json);
    }
}
