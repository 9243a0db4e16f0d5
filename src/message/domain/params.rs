//! Untrusted request parameters as received from a query string or JSON body.
//!
//! Every inbound value is one of three shapes: a scalar, an ordered list, or
//! a nested map. Resolving the shape once here keeps type sniffing out of the
//! individual validators.

use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;
use url::form_urlencoded;

/// A single scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit `null` from a JSON body.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Floating-point number, kept distinct so integer fields can reject it.
    Float(f64),
    /// String value.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A raw parameter value: scalar, ordered list, or nested map.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A single value.
    Scalar(Scalar),
    /// An ordered sequence of values.
    List(Vec<Self>),
    /// A nested mapping such as `{gt: ..., lte: ...}` or `fields[space]=...`.
    Map(ParamMap),
}

impl ParamValue {
    /// Creates a string scalar.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    /// Creates an explicit null.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Returns the string content when this is a string scalar.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Returns the nested map when this value is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ParamMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts a JSON value into a parameter value, preserving key order.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Number(number) => Self::Scalar(number_to_scalar(&number)),
            Value::String(text) => Self::text(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(key, item)| (key, Self::from_json(item)))
                    .collect(),
            ),
        }
    }

    /// Converts this value back into JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(Scalar::Null) => Value::Null,
            Self::Scalar(Scalar::Bool(flag)) => Value::Bool(*flag),
            Self::Scalar(Scalar::Integer(number)) => Value::from(*number),
            Self::Scalar(Scalar::Float(number)) => {
                Number::from_f64(*number).map_or(Value::Null, Value::Number)
            }
            Self::Scalar(Scalar::Text(text)) => Value::String(text.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(map.to_json_object()),
        }
    }
}

fn number_to_scalar(number: &Number) -> Scalar {
    if let Some(integer) = number.as_i64() {
        return Scalar::Integer(integer);
    }
    number.as_f64().map_or(Scalar::Null, Scalar::Float)
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl<T: Into<Self>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<ParamMap> for ParamValue {
    fn from(value: ParamMap) -> Self {
        Self::Map(value)
    }
}

/// Ordered string-keyed parameter map.
///
/// Keys keep their first-insertion position; re-inserting a key replaces its
/// value in place. Order matters because unknown keys are reported in the
/// order the caller sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

/// Raw request parameters: the top-level map of an inbound request.
pub type RawParams = ParamMap;

/// Errors raised when a request body cannot be read as parameters at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// The JSON body was not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl ParamMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key_string = key.into();
        let param = value.into();
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == key_string)
        {
            slot.1 = param;
        } else {
            self.entries.push((key_string, param));
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` when the key was supplied.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no parameters were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::NotAnObject`] when the body is not a JSON object.
    pub fn from_json(body: Value) -> Result<Self, ParamsError> {
        match ParamValue::from_json(body) {
            ParamValue::Map(map) => Ok(map),
            _ => Err(ParamsError::NotAnObject),
        }
    }

    /// Converts the map into a JSON object.
    #[must_use]
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }

    /// Parses a URL query string.
    ///
    /// `key=value` becomes a string scalar, `key[]=a&key[]=b` a list and
    /// `key[sub]=value` a nested map. Deeper bracket nesting is kept as a
    /// literal key so that it surfaces as an unknown parameter.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        let trimmed = query.strip_prefix('?').unwrap_or(query);
        for (raw_key, raw_value) in form_urlencoded::parse(trimmed.as_bytes()) {
            let value = raw_value.into_owned();
            match split_bracketed_key(&raw_key) {
                Some((base, "")) => params.push_list_item(base, value),
                Some((base, sub)) => params.insert_nested(base, sub, value),
                None => params.insert(raw_key.into_owned(), value),
            }
        }
        params
    }

    fn push_list_item(&mut self, key: &str, value: String) {
        let item = ParamValue::text(value);
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
        {
            Some((_, ParamValue::List(items))) => items.push(item),
            Some((_, existing)) => {
                let previous = std::mem::replace(existing, ParamValue::List(Vec::new()));
                *existing = ParamValue::List(vec![previous, item]);
            }
            None => self.entries.push((key.to_owned(), ParamValue::List(vec![item]))),
        }
    }

    fn insert_nested(&mut self, key: &str, sub_key: &str, value: String) {
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
        {
            Some((_, ParamValue::Map(nested))) => nested.insert(sub_key, value),
            Some((_, existing)) => {
                *existing = ParamValue::Map(Self::new().with(sub_key, value));
            }
            None => self.entries.push((
                key.to_owned(),
                ParamValue::Map(Self::new().with(sub_key, value)),
            )),
        }
    }
}

fn split_bracketed_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let (base, sub) = inner.split_once('[')?;
    if base.is_empty() || sub.contains('[') || sub.contains(']') {
        return None;
    }
    Some((base, sub))
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
