//! Error capture and serialization
//!
//! Converts an error and its `source()` chain into a plain JSON object of
//! the shape `{name, message, stack?, cause?}`. The cause chain is bounded
//! by [`MAX_CAUSE_DEPTH`] so a pathological chain cannot run away; anything
//! beyond the bound is replaced by a truncation marker.

use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// Maximum number of nested causes serialized below the root error.
pub const MAX_CAUSE_DEPTH: usize = 10;

const TRUNCATION_NAME: &str = "Truncated";
const TRUNCATION_MESSAGE: &str = "cause chain exceeds maximum depth";

/// An error captured at the call site, ready to be serialized into a record.
///
/// Capture walks the `source()` chain eagerly so the chain survives even if
/// the originating error is dropped before the record is rendered. A
/// backtrace is recorded when the process has backtraces enabled
/// (`RUST_BACKTRACE`); whether it is emitted is decided later by the
/// engine's `include_stacks` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorChain {
    name: String,
    message: String,
    backtrace: Option<String>,
    causes: Vec<CauseLink>,
    truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CauseLink {
    name: String,
    message: String,
}

impl ErrorChain {
    /// Capture a concrete error and its cause chain.
    pub fn capture<E>(err: &E) -> Self
    where
        E: Error,
    {
        let mut causes = Vec::new();
        let mut truncated = false;
        let mut source = err.source();
        while let Some(cause) = source {
            if causes.len() == MAX_CAUSE_DEPTH {
                truncated = true;
                break;
            }
            causes.push(CauseLink {
                name: name_from_debug(cause),
                message: cause.to_string(),
            });
            source = cause.source();
        }

        Self {
            name: short_type_name::<E>(),
            message: err.to_string(),
            backtrace: capture_backtrace(),
            causes,
            truncated,
        }
    }

    /// Capture an [`anyhow::Error`] and its context chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let mut chain = err.chain();
        let (name, message) = match chain.next() {
            Some(root) => (name_from_debug(root), root.to_string()),
            None => ("Error".to_string(), err.to_string()),
        };

        let mut causes = Vec::new();
        let mut truncated = false;
        for cause in chain {
            if causes.len() == MAX_CAUSE_DEPTH {
                truncated = true;
                break;
            }
            causes.push(CauseLink {
                name: name_from_debug(cause),
                message: cause.to_string(),
            });
        }

        let backtrace = match err.backtrace().status() {
            BacktraceStatus::Captured => Some(err.backtrace().to_string()),
            _ => None,
        };

        Self {
            name,
            message,
            backtrace,
            causes,
            truncated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Serialize as a JSON object: `{name, message, stack?, cause?}`.
    ///
    /// `stack` is present only when `include_stack` is set and a backtrace
    /// was captured; it is omitted entirely otherwise, never null.
    pub fn serialize(&self, include_stack: bool) -> Value {
        Value::Object(self.serialize_map(include_stack))
    }

    pub(crate) fn serialize_map(&self, include_stack: bool) -> Map<String, Value> {
        // Build the nested cause objects innermost-first so the truncation
        // marker lands at the bottom of the chain.
        let mut cause: Option<Value> = self.truncated.then(|| {
            let mut marker = Map::new();
            marker.insert("name".to_string(), Value::String(TRUNCATION_NAME.to_string()));
            marker.insert(
                "message".to_string(),
                Value::String(TRUNCATION_MESSAGE.to_string()),
            );
            Value::Object(marker)
        });

        for link in self.causes.iter().rev() {
            let mut obj = Map::new();
            obj.insert("name".to_string(), Value::String(link.name.clone()));
            obj.insert("message".to_string(), Value::String(link.message.clone()));
            if let Some(inner) = cause.take() {
                obj.insert("cause".to_string(), inner);
            }
            cause = Some(Value::Object(obj));
        }

        let mut root = Map::new();
        root.insert("name".to_string(), Value::String(self.name.clone()));
        root.insert("message".to_string(), Value::String(self.message.clone()));
        if include_stack {
            if let Some(stack) = &self.backtrace {
                root.insert("stack".to_string(), Value::String(stack.clone()));
            }
        }
        if let Some(inner) = cause {
            root.insert("cause".to_string(), inner);
        }
        root
    }
}

fn capture_backtrace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

/// Trailing segment of a type path, with any generic arguments dropped.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Best-effort name for a type-erased error: the leading identifier of its
/// `Debug` rendering, which for derived impls is the struct or variant name.
fn name_from_debug(err: &(dyn Error + 'static)) -> String {
    let debug = format!("{err:?}");
    let token: String = debug
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if token.is_empty() {
        "Error".to_string()
    } else {
        token
    }
}
