//! Conversion between nested translation documents and flat key maps.
//!
//! ```
//! use serde_json::json;
//! use i18n_table::codec::{flatten, unflatten};
//!
//! let doc = json!({ "home": { "title": "Hi", "footer": { "copyright": "©" } } });
//! let flat = flatten(&doc).unwrap();
//! assert_eq!(flat.len(), 2);
//! assert_eq!(unflatten(&flat).unwrap(), doc);
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::types::{
    KEY_SEPARATOR,
    KeyPath,
};

/// Flattened document: key path → leaf value, in document order.
pub type FlatMap = IndexMap<KeyPath, Value>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("Key '{key}' under '{prefix}' cannot be used as a key path segment")]
    InvalidSegment { key: String, prefix: String },

    #[error("Key '{path}' is used both as a value and as a parent of other keys")]
    PathConflict { path: String },
}

/// Flatten a nested JSON object into a dot-separated key map.
///
/// Only objects are descended into. Arrays, strings, numbers, booleans and
/// `null` end the recursion and are kept as-is under their key. Empty
/// objects contribute no keys.
///
/// # Errors
/// - [`CodecError::NotAnObject`] if `json` is not an object
/// - [`CodecError::InvalidSegment`] if an object key is empty or contains `.`
pub fn flatten(json: &Value) -> Result<FlatMap, CodecError> {
    let Value::Object(map) = json else {
        return Err(CodecError::NotAnObject(kind_of(json)));
    };
    let mut result = FlatMap::new();
    flatten_object(map, None, &mut result)?;
    Ok(result)
}

fn flatten_object(
    map: &Map<String, Value>,
    prefix: Option<&KeyPath>,
    result: &mut FlatMap,
) -> Result<(), CodecError> {
    for (key, value) in map {
        let full_key = match prefix {
            Some(parent) => parent.child(key),
            None => KeyPath::from_segment(key),
        }
        .ok_or_else(|| CodecError::InvalidSegment {
            key: key.clone(),
            prefix: prefix.map(ToString::to_string).unwrap_or_default(),
        })?;

        match value {
            Value::Object(nested) => flatten_object(nested, Some(&full_key), result)?,
            _ => {
                result.insert(full_key, value.clone());
            }
        }
    }
    Ok(())
}

/// Rebuild a nested JSON object from flat key/value pairs.
///
/// Pairs may arrive in any order. A key that is both a value and the parent
/// of another key (`a` and `a.b`) is rejected whichever comes first, so the
/// result never depends on iteration order.
///
/// # Errors
/// Returns [`CodecError::PathConflict`] naming the key that would have to be
/// both a value and an object.
pub fn unflatten<'a, I>(entries: I) -> Result<Value, CodecError>
where
    I: IntoIterator<Item = (&'a KeyPath, &'a Value)>,
{
    let mut root = Map::new();
    let mut leaves: HashSet<&'a str> = HashSet::new();
    let mut containers: HashSet<&'a str> = HashSet::new();

    for (path, value) in entries {
        let full = path.as_str();
        if containers.contains(full) {
            return Err(CodecError::PathConflict { path: full.to_string() });
        }

        let mut current = &mut root;
        let mut segments = path.segments().peekable();
        let mut consumed = 0;
        while let Some(segment) = segments.next() {
            consumed += segment.len();
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value.clone());
                break;
            }

            // `consumed` always ends on a segment boundary inside `full`.
            #[allow(clippy::indexing_slicing)]
            let prefix = &full[..consumed];
            if leaves.contains(prefix) {
                return Err(CodecError::PathConflict { path: prefix.to_string() });
            }
            containers.insert(prefix);
            consumed += KEY_SEPARATOR.len_utf8();

            current = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or_else(|| CodecError::PathConflict { path: prefix.to_string() })?;
        }
        leaves.insert(full);
    }

    Ok(Value::Object(root))
}

/// Text stored in the translation table for a flattened leaf.
///
/// Strings are kept verbatim; other leaves use their compact JSON text.
#[must_use]
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
