//! # Logweave Core
//!
//! Structured logging engine: level filtering, meta normalization, error
//! serialization, redaction, JSON/text formatting, and ambient
//! correlation-context propagation.
//!
//! ## Modules
//!
//! - `level` - Severity levels and threshold semantics
//! - `record` - The log record shape (JSON Lines wire format)
//! - `meta` - Caller-supplied data as a closed variant, plus normalization
//! - `error_chain` - Error capture with depth-bounded cause chains
//! - `redact` - Top-level key redaction
//! - `format` - JSON and colorized text rendering
//! - `context` - Task-local correlation id scoping
//! - `config` - Engine configuration and environment defaults
//! - `sink` - Output destinations (stdout, append-mode file)
//! - `logger` - The engine facade, bound loggers, the shared instance
//!
//! ## Example
//!
//! ```
//! use logweave_core::{LogFormat, LogLevel, Logger, LoggerConfig};
//! use serde_json::json;
//!
//! let logger = Logger::new(
//!     LoggerConfig::new()
//!         .with_service("auth")
//!         .with_min_level(LogLevel::Info)
//!         .with_format(LogFormat::Json),
//! )
//! .unwrap();
//!
//! logger.info("user signed in", json!({"userId": 7}));
//! logger.debug("dropped below the threshold", ());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod error_chain;
pub mod format;
pub mod level;
pub mod logger;
pub mod meta;
pub mod record;
pub mod redact;
pub mod sink;

// Re-export commonly used types
pub use config::{LogFormat, LoggerConfig};
pub use context::{current_correlation_id, with_correlation_id, with_correlation_id_sync};
pub use error::LoggerError;
pub use error_chain::{ErrorChain, MAX_CAUSE_DEPTH};
pub use level::LogLevel;
pub use logger::{global, init, BoundLogger, Logger};
pub use meta::{normalize, Meta, MetaMap};
pub use record::LogRecord;
pub use redact::{redact, RedactionRule, REDACTED};
pub use sink::LogSink;
