//! Sensitive field redaction
//!
//! Redaction runs after normalization, over the top-level keys of a
//! record's meta. Values under matching keys are replaced wholesale by the
//! sentinel; their content is never inspected. Nested objects are not
//! descended into: callers who care about redaction keep sensitive data at
//! the top level.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::LoggerError;

/// Replacement written over redacted values.
pub const REDACTED: &str = "[REDACTED]";

lazy_static! {
    // Key-shape catch-all for the standard set: credential-ish suffixes in
    // snake_case, kebab-case or camelCase.
    static ref CREDENTIAL_KEY: Regex =
        Regex::new(r"(?i)(password|passwd|secret|token|api[-_]?key)$").unwrap();
}

/// A single redaction rule: an exact key or a key pattern.
#[derive(Debug, Clone)]
pub enum RedactionRule {
    Exact(String),
    Pattern(Regex),
}

impl RedactionRule {
    pub fn exact(key: impl Into<String>) -> Self {
        Self::Exact(key.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self, LoggerError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| LoggerError::InvalidRedactionPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == key,
            Self::Pattern(regex) => regex.is_match(key),
        }
    }

    /// The default rule set: common credential field names plus a pattern
    /// catching credential-ish key suffixes.
    pub fn standard_set() -> Vec<RedactionRule> {
        let mut rules: Vec<RedactionRule> = [
            "password",
            "passwd",
            "secret",
            "token",
            "api_key",
            "apikey",
            "authorization",
            "cookie",
            "set-cookie",
            "x-api-key",
            "access_token",
            "refresh_token",
            "private_key",
            "credentials",
        ]
        .into_iter()
        .map(RedactionRule::exact)
        .collect();
        rules.push(RedactionRule::Pattern(CREDENTIAL_KEY.clone()));
        rules
    }
}

/// Apply redaction rules to a meta mapping, returning a masked copy.
///
/// Only top-level keys are examined. A key matched by several rules is
/// redacted once; the sentinel itself never re-matches into anything else.
pub fn redact(meta: &Map<String, Value>, rules: &[RedactionRule]) -> Map<String, Value> {
    meta.iter()
        .map(|(key, value)| {
            if rules.iter().any(|rule| rule.matches(key)) {
                (key.clone(), Value::String(REDACTED.to_string()))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}
