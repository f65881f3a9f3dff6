//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::LoggerError;
use crate::level::LogLevel;
use crate::redact::RedactionRule;

const DEVELOPMENT: &str = "development";

/// Output mode for rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (structured)
    #[default]
    Json,
    /// Colorized human-readable line
    Text,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LoggerError::InvalidFormat(s.to_string()))
    }
}

/// Logger configuration, immutable once the engine is constructed.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Name of the emitting process
    pub service: String,

    /// Deployment environment label
    pub environment: String,

    /// Minimum level to emit; less severe calls are dropped entirely
    pub min_level: LogLevel,

    /// Output mode
    pub format: LogFormat,

    /// Include captured backtraces in serialized errors
    pub include_stacks: bool,

    /// Redaction rules applied to top-level meta keys
    pub redact: Vec<RedactionRule>,

    /// Append-mode destination file; stdout when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service: "app".to_string(),
            environment: DEVELOPMENT.to_string(),
            min_level: LogLevel::Debug,
            format: LogFormat::Text,
            include_stacks: false,
            redact: RedactionRule::standard_set(),
            file: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment (loading `.env`
    /// first). Unset level and format fall back to per-environment
    /// defaults: development gets `debug` + `text`, anything else gets
    /// `info` + `json`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let environment = get("APP_ENV").unwrap_or_else(|| DEVELOPMENT.to_string());
        let development = environment == DEVELOPMENT;

        let min_level = get("LOG_LEVEL")
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(if development {
                LogLevel::Debug
            } else {
                LogLevel::Info
            });

        let format = get("LOG_FORMAT")
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or(if development {
                LogFormat::Text
            } else {
                LogFormat::Json
            });

        let include_stacks = get("LOG_STACKS")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut redact = RedactionRule::standard_set();
        if let Some(extra) = get("LOG_REDACT") {
            redact.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(RedactionRule::exact),
            );
        }

        Self {
            service: get("LOG_SERVICE").unwrap_or_else(|| "app".to_string()),
            environment,
            min_level,
            format,
            include_stacks,
            redact,
            file: get("LOG_FILE").map(PathBuf::from),
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_stacks(mut self, include: bool) -> Self {
        self.include_stacks = include;
        self
    }

    pub fn with_redaction(mut self, rules: Vec<RedactionRule>) -> Self {
        self.redact = rules;
        self
    }

    pub fn with_redact_key(mut self, key: impl Into<String>) -> Self {
        self.redact.push(RedactionRule::exact(key));
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}
