//! Log levels and severity ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

/// Log level, ordered from most to least severe.
///
/// The derived ordering follows severity: `Error < Warn < Info < Http <
/// Debug`. A call is emitted when its level compares less than or equal to
/// the configured minimum, so `min_level = Info` lets `error`, `warn` and
/// `info` through and drops `http` and `debug`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Http,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Http => "http",
            Self::Debug => "debug",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "http" => Some(Self::Http),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Check if this level should be emitted given a configured minimum.
    pub fn should_log(&self, min_level: LogLevel) -> bool {
        *self <= min_level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}
