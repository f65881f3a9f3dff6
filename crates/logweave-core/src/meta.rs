//! Caller-supplied log data and its normalization
//!
//! Arbitrary "extra data" passed to a log call is modeled as a closed
//! variant rather than reflected over at runtime: a scalar, a sequence, a
//! mapping, a captured error, or nothing. [`normalize`] is a total function
//! over that variant producing the flat mapping that ends up in a record's
//! `meta` field. Whatever shape a caller hands in, the record stays a
//! mapping and never contains a raw error value.

use serde_json::{Map, Value};

use crate::error_chain::ErrorChain;

/// Structured data attached to a log call.
#[derive(Debug, Clone, Default)]
pub enum Meta {
    /// Nothing attached.
    #[default]
    None,
    /// A bare scalar (string, number, boolean, null).
    Scalar(Value),
    /// A sequence of values.
    Sequence(Vec<Meta>),
    /// A key-value mapping, in insertion order.
    Mapping(Vec<(String, Meta)>),
    /// A captured error chain.
    Error(ErrorChain),
}

impl Meta {
    /// Capture an error and its cause chain as log data.
    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error,
    {
        Self::Error(ErrorChain::capture(err))
    }

    /// Capture an [`anyhow::Error`] as log data.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self::Error(ErrorChain::from_anyhow(err))
    }

    /// Start a mapping builder, for mixing plain fields with errors:
    ///
    /// ```
    /// use logweave_core::Meta;
    ///
    /// let err = std::io::Error::other("disk full");
    /// let meta = Meta::map()
    ///     .field("userId", 7)
    ///     .field("error", Meta::error(&err));
    /// ```
    pub fn map() -> MetaMap {
        MetaMap::default()
    }
}

/// Builder for [`Meta::Mapping`].
#[derive(Debug, Default)]
pub struct MetaMap(Vec<(String, Meta)>);

impl MetaMap {
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Meta>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }
}

impl From<MetaMap> for Meta {
    fn from(map: MetaMap) -> Self {
        Meta::Mapping(map.0)
    }
}

impl From<()> for Meta {
    fn from(_: ()) -> Self {
        Meta::None
    }
}

impl From<Value> for Meta {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Meta::Mapping(map.into_iter().map(|(k, v)| (k, Meta::from(v))).collect())
            }
            Value::Array(items) => Meta::Sequence(items.into_iter().map(Meta::from).collect()),
            scalar => Meta::Scalar(scalar),
        }
    }
}

impl From<Map<String, Value>> for Meta {
    fn from(map: Map<String, Value>) -> Self {
        Meta::from(Value::Object(map))
    }
}

impl From<ErrorChain> for Meta {
    fn from(chain: ErrorChain) -> Self {
        Meta::Error(chain)
    }
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Meta {
                fn from(value: $ty) -> Self {
                    Meta::Scalar(Value::from(value))
                }
            }
        )*
    };
}

scalar_from!(&str, String, bool, i32, i64, u32, u64, f64);

/// Flatten caller-supplied data into a record's `meta` mapping.
///
/// - nothing → empty mapping
/// - an error → the serialized error object's fields
/// - a sequence → wrapped under an `items` key so the record shape stays a
///   mapping
/// - a mapping → shallow copy, with error values replaced by their
///   serialized form
/// - a bare scalar → wrapped under a `value` key
pub fn normalize(meta: Meta, include_stacks: bool) -> Map<String, Value> {
    match meta {
        Meta::None => Map::new(),
        Meta::Error(chain) => chain.serialize_map(include_stacks),
        Meta::Sequence(items) => {
            let items: Vec<Value> = items
                .into_iter()
                .map(|item| to_value(item, include_stacks))
                .collect();
            let mut map = Map::new();
            map.insert("items".to_string(), Value::Array(items));
            map
        }
        Meta::Mapping(pairs) => pairs
            .into_iter()
            .map(|(key, value)| (key, to_value(value, include_stacks)))
            .collect(),
        Meta::Scalar(value) => {
            let mut map = Map::new();
            map.insert("value".to_string(), value);
            map
        }
    }
}

fn to_value(meta: Meta, include_stacks: bool) -> Value {
    match meta {
        Meta::None => Value::Null,
        Meta::Scalar(value) => value,
        Meta::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| to_value(item, include_stacks))
                .collect(),
        ),
        Meta::Mapping(pairs) => Value::Object(
            pairs
                .into_iter()
                .map(|(key, value)| (key, to_value(value, include_stacks)))
                .collect(),
        ),
        Meta::Error(chain) => chain.serialize(include_stacks),
    }
}
