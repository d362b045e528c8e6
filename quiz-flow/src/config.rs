//! Layered configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `quiz-flow.toml` in the working directory
//! 3. an explicit config file
//! 4. `QUIZ_FLOW_*` environment variables, with `__` separating sections
//!    (`QUIZ_FLOW_SUBMIT__ENDPOINT=https://...`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::TextRules;
use crate::logging::LogFormat;

pub const PROJECT_CONFIG_FILE: &str = "quiz-flow.toml";
pub const ENV_PREFIX: &str = "QUIZ_FLOW_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub submit: SubmitConfig,
    pub text: TextRules,
    pub log: LogConfig,
}

/// Where finished quizzes go.
///
/// An endpoint takes precedence over an output directory. With neither, the
/// payload is only printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub endpoint: Option<String>,
    pub retries: u32,
    pub timeout_secs: u64,
    pub output_dir: Option<PathBuf>,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            retries: 2,
            timeout_secs: 10,
            output_dir: None,
        }
    }
}

impl SubmitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid configuration: {0}")]
pub struct ConfigError(#[from] Box<figment::Error>);

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from every source.
    pub fn load(config_path: Option<&Path>) -> Result<QuizConfig, ConfigError> {
        Self::figment(config_path)
            .extract()
            .map_err(|err| ConfigError(Box::new(err)))
    }

    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(QuizConfig::default()))
            .merge(Toml::file(PROJECT_CONFIG_FILE));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
