//! Defensive parsing of paginated response envelopes.
//!
//! Deno Deploy list endpoints answer either with a bare JSON array or with an
//! object that carries the collection under one of several keys. The keys
//! are checked in a fixed priority order; the first one holding an array
//! wins. An object with none of them is a defined terminal case, not an
//! error: callers treat it as a single result.

use serde_json::Value;

/// Collection keys, in the order they are probed.
pub const COLLECTION_KEYS: [&str; 10] = [
    "data",
    "items",
    "results",
    "deployments",
    "projects",
    "domains",
    "databases",
    "logs",
    "certificates",
    "regions",
];

/// Shape of one page as far as pagination is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<'a> {
    /// The response itself was an array.
    Bare(&'a [Value]),
    /// An object holding its items under `key`.
    Keyed {
        key: &'static str,
        items: &'a [Value],
        next_cursor: Option<&'a str>,
    },
    /// An object without a recognized collection key.
    Single(&'a Value),
    /// `null` or a scalar; nothing to collect.
    Empty,
}

impl<'a> Envelope<'a> {
    /// Classify a raw response.
    pub fn parse(response: &'a Value) -> Self {
        match response {
            Value::Array(items) => Self::Bare(items),
            Value::Object(_) => match find_collection_key(response) {
                Some(key) => Self::Keyed {
                    key,
                    items: response[key].as_array().map(Vec::as_slice).unwrap_or(&[]),
                    next_cursor: next_cursor(response),
                },
                None => Self::Single(response),
            },
            _ => Self::Empty,
        }
    }
}

/// First key of [`COLLECTION_KEYS`] whose value is an array.
pub fn find_collection_key(response: &Value) -> Option<&'static str> {
    let obj = response.as_object()?;
    COLLECTION_KEYS
        .into_iter()
        .find(|key| obj.get(*key).is_some_and(Value::is_array))
}

/// Non-empty string `nextCursor` of an object response.
pub fn next_cursor(response: &Value) -> Option<&str> {
    response
        .get("nextCursor")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
}

/// Items of a response regardless of envelope shape.
///
/// Bare and keyed arrays yield their elements, a lone object yields
/// itself, anything else yields nothing.
pub fn collect_items(response: &Value) -> Vec<Value> {
    match Envelope::parse(response) {
        Envelope::Bare(items) | Envelope::Keyed { items, .. } => items.to_vec(),
        Envelope::Single(obj) => vec![obj.clone()],
        Envelope::Empty => Vec::new(),
    }
}
