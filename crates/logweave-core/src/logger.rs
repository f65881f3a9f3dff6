//! Logger engine
//!
//! The facade over the whole pipeline: level filtering, normalization,
//! correlation-id resolution, redaction, formatting, and the final write.
//! Engines are cheap to clone and share; configuration is read-only after
//! construction.

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};

use crate::config::LoggerConfig;
use crate::context;
use crate::error::LoggerError;
use crate::format;
use crate::level::LogLevel;
use crate::meta::{normalize, Meta};
use crate::record::LogRecord;
use crate::redact::redact;
use crate::sink::{FileSink, LogSink, StdoutSink};

/// Explicit per-call fields that override the ambient correlation id.
const CORRELATION_KEYS: [&str; 2] = ["requestId", "correlationId"];

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The logging engine.
///
/// Emission pipeline per call: check the level threshold (dropped calls do
/// no further work), normalize the caller's data, pull an explicit
/// `requestId`/`correlationId` out of it (falling back to the ambient
/// context), redact, assemble a timestamped record, render, write one line.
/// Writes are fire-and-forget.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    config: LoggerConfig,
    sink: Box<dyn LogSink>,
}

impl Logger {
    /// Construct an engine, opening the destination file when the
    /// configuration names one. Construction failures propagate.
    pub fn new(config: LoggerConfig) -> Result<Self, LoggerError> {
        let sink: Box<dyn LogSink> = match &config.file {
            Some(path) => Box::new(FileSink::open(path)?),
            None => Box::new(StdoutSink),
        };
        Ok(Self::with_sink(config, sink))
    }

    /// Construct an engine over an explicit sink.
    pub fn with_sink(config: LoggerConfig, sink: Box<dyn LogSink>) -> Self {
        Self {
            inner: Arc::new(LoggerInner { config, sink }),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.inner.config
    }

    /// Whether a call at this level would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.should_log(self.inner.config.min_level)
    }

    pub fn error(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Error, message, meta);
    }

    pub fn warn(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Warn, message, meta);
    }

    pub fn info(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Info, message, meta);
    }

    /// Request-completion level. Callers are expected to supply at least
    /// `method`, `url`, `statusCode` and `duration` in the data.
    pub fn http(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Http, message, meta);
    }

    pub fn debug(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Debug, message, meta);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>, meta: impl Into<Meta>) {
        if !self.enabled(level) {
            return;
        }
        let fields = normalize(meta.into(), self.inner.config.include_stacks);
        self.emit(level, message.into(), fields);
    }

    /// Return a logger view with `fields` merged into every call's data.
    /// Per-call fields win on key collision. Bound loggers delegate
    /// emission (destination, context, config) to this engine.
    pub fn bind(&self, fields: impl Into<Meta>) -> BoundLogger {
        BoundLogger {
            parent: self.clone(),
            fields: normalize(fields.into(), self.inner.config.include_stacks),
        }
    }

    fn emit(&self, level: LogLevel, message: String, mut fields: Map<String, Value>) {
        let request_id =
            take_correlation_id(&mut fields).or_else(context::current_correlation_id);
        let meta = redact(&fields, &self.inner.config.redact);

        let record = LogRecord {
            timestamp: Utc::now(),
            level,
            message,
            service: self.inner.config.service.clone(),
            environment: self.inner.config.environment.clone(),
            meta,
            request_id,
        };

        let line = format::render(&record, self.inner.config.format);
        self.inner.sink.write_line(&line);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// A logger view carrying a fixed set of fields.
#[derive(Debug, Clone)]
pub struct BoundLogger {
    parent: Logger,
    fields: Map<String, Value>,
}

impl BoundLogger {
    pub fn error(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Error, message, meta);
    }

    pub fn warn(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Warn, message, meta);
    }

    pub fn info(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Info, message, meta);
    }

    pub fn http(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Http, message, meta);
    }

    pub fn debug(&self, message: impl Into<String>, meta: impl Into<Meta>) {
        self.log(LogLevel::Debug, message, meta);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>, meta: impl Into<Meta>) {
        if !self.parent.enabled(level) {
            return;
        }
        let mut merged = self.fields.clone();
        merged.extend(normalize(
            meta.into(),
            self.parent.inner.config.include_stacks,
        ));
        self.parent.emit(level, message.into(), merged);
    }

    /// Bind further fields on top of the existing set.
    pub fn bind(&self, fields: impl Into<Meta>) -> BoundLogger {
        let mut merged = self.fields.clone();
        merged.extend(normalize(
            fields.into(),
            self.parent.inner.config.include_stacks,
        ));
        BoundLogger {
            parent: self.parent.clone(),
            fields: merged,
        }
    }
}

fn take_correlation_id(fields: &mut Map<String, Value>) -> Option<String> {
    for key in CORRELATION_KEYS {
        if matches!(fields.get(key), Some(Value::String(_))) {
            if let Some(Value::String(id)) = fields.shift_remove(key) {
                return Some(id);
            }
        }
    }
    None
}

/// Install the process-wide logger. Fails loudly if one is already
/// installed; conflicting reconfiguration is a programming error, not
/// something to ignore silently.
pub fn init(config: LoggerConfig) -> Result<(), LoggerError> {
    let logger = Logger::new(config)?;
    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide logger, installing one from environment defaults on
/// first access. If the environment names a file that cannot be opened,
/// the fallback logger writes to stdout rather than panicking.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| {
        let config = LoggerConfig::from_env();
        match Logger::new(config.clone()) {
            Ok(logger) => logger,
            Err(_) => Logger::with_sink(
                LoggerConfig {
                    file: None,
                    ..config
                },
                Box::new(StdoutSink),
            ),
        }
    })
}
