//! Library error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while constructing or configuring a logger.
///
/// Per-call logging is best-effort and never returns an error; only
/// construction-time problems (an unwritable file path, a malformed
/// redaction pattern) propagate to the caller.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to open log file {path}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid redaction pattern `{pattern}`")]
    InvalidRedactionPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid log level `{0}`")]
    InvalidLevel(String),

    #[error("invalid log format `{0}`")]
    InvalidFormat(String),

    #[error("global logger already initialized")]
    AlreadyInitialized,
}
