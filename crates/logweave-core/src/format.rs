//! Record rendering
//!
//! Pure functions from a finished record to a single output line. JSON mode
//! produces one object per line in the wire shape; text mode produces a
//! colorized human-oriented line. Color codes never appear in JSON mode.

use serde_json::Value;

use crate::config::LogFormat;
use crate::level::LogLevel;
use crate::record::LogRecord;

const RESET: &str = "\x1b[0m";

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "\x1b[31m", // red
        LogLevel::Warn => "\x1b[33m",  // yellow
        LogLevel::Info => "\x1b[32m",  // green
        LogLevel::Http => "\x1b[35m",  // magenta
        LogLevel::Debug => "\x1b[36m", // cyan
    }
}

/// Render a record as a single line in the given format.
pub fn render(record: &LogRecord, format: LogFormat) -> String {
    match format {
        LogFormat::Json => render_json(record),
        LogFormat::Text => render_text(record),
    }
}

fn render_json(record: &LogRecord) -> String {
    // The record is an owned tree of strings and JSON values, so
    // serialization cannot observe a cycle. The fallback line keeps a
    // serializer failure from ever reaching the caller as a panic.
    serde_json::to_string(record).unwrap_or_else(|err| {
        let message = Value::String(format!("log record serialization failed: {err}"));
        format!("{{\"level\":\"error\",\"message\":{message}}}")
    })
}

fn render_text(record: &LogRecord) -> String {
    let mut line = format!(
        "{} {}{:>5}{}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        level_color(record.level),
        record.level.as_str(),
        RESET,
    );
    if let Some(id) = &record.request_id {
        line.push_str(&format!(" [{id}]"));
    }
    line.push(' ');
    line.push_str(&record.message);
    if !record.meta.is_empty() {
        line.push(' ');
        line.push_str(&Value::Object(record.meta.clone()).to_string());
    }
    line
}
