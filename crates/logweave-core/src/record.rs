//! Log record shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::level::LogLevel;

/// A finished log record (stored as JSON Lines in `json` mode).
///
/// Records are transient: one is assembled per emitted call and only its
/// rendered form persists. By the time a record exists its `meta` has been
/// normalized and redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Timestamp (ISO 8601)
    pub timestamp: DateTime<Utc>,

    /// Log level
    pub level: LogLevel,

    /// Message
    pub message: String,

    /// Emitting process, fixed at engine construction
    pub service: String,

    /// Deployment environment, fixed at engine construction
    pub environment: String,

    /// Normalized, redacted structured fields
    pub meta: Map<String, Value>,

    /// Correlation id, resolved from explicit data or the ambient context
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}
