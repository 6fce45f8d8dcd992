//! Typed configuration model for UserScript headers
//!
//! A header configuration is an ordered list of entries. Each entry pairs a
//! directive key with a value whose shape is fixed when the configuration is
//! built: a single [`Scalar`], a list of scalars, or an ordered map of
//! sub-keys to scalars.

use crate::error::{Error, Result};
use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A single directive value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Flag value. `true` and `false` both render as a flag-only directive.
    Bool(bool),
}

impl Scalar {
    pub fn is_bool(&self) -> bool {
        matches!(self, Scalar::Bool(_))
    }

    /// Convert an untyped JSON value, rejecting `null` and nested containers
    fn from_json(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Bool(b) => Ok(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Scalar::Integer(i)),
                None => n.as_f64().map(Scalar::Float).ok_or_else(|| Error::InvalidValue {
                    key: key.to_string(),
                    reason: format!("number {} is out of range", n),
                }),
            },
            Value::Null => Err(Error::InvalidValue {
                key: key.to_string(),
                reason: "value cannot be null".to_string(),
            }),
            Value::Array(_) | Value::Object(_) => Err(Error::InvalidValue {
                key: key.to_string(),
                reason: "nested lists and maps are not supported".to_string(),
            }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => format_float(*x, f),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Format a float the way JavaScript's `Number#toString` does
///
/// Magnitudes from `1e-6` up to `1e21` print in positional notation, others
/// in exponent notation with an explicit sign (`1e+21`, `1.5e-7`). Negative
/// zero prints as `0`.
fn format_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }

    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", x);
    }

    let exponent = format!("{:e}", x);
    match exponent.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => f.write_str(&exponent),
    }
}

/// The shape of one configuration entry
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    /// Sub-key/value pairs in insertion order
    Map(Vec<(String, Scalar)>),
}

impl OptionValue {
    fn from_json(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Scalar::from_json(key, item))
                .collect::<Result<Vec<_>>>()
                .map(OptionValue::List),
            Value::Object(entries) => entries
                .iter()
                .map(|(sub_key, sub_value)| {
                    Scalar::from_json(key, sub_value).map(|s| (sub_key.clone(), s))
                })
                .collect::<Result<Vec<_>>>()
                .map(OptionValue::Map),
            other => Scalar::from_json(key, other).map(OptionValue::Scalar),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $body
                }
            }

            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_scalar_from! {
    &str => |v| Scalar::Text(v.to_string()),
    String => |v| Scalar::Text(v),
    i32 => |v| Scalar::Integer(i64::from(v)),
    i64 => |v| Scalar::Integer(v),
    u32 => |v| Scalar::Integer(i64::from(v)),
    f64 => |v| Scalar::Float(v),
    bool => |v| Scalar::Bool(v),
    RunAt => |v| Scalar::Text(v.as_str().to_string()),
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for u32 {}
    impl Sealed for f64 {}
}

/// Numeric types accepted by [`HeaderOptions::number`]
pub trait Numeric: Into<Scalar> + sealed::Sealed {}

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u32 {}
impl Numeric for f64 {}

impl From<Scalar> for OptionValue {
    fn from(value: Scalar) -> Self {
        OptionValue::Scalar(value)
    }
}

impl From<Vec<Scalar>> for OptionValue {
    fn from(values: Vec<Scalar>) -> Self {
        OptionValue::List(values)
    }
}

/// Allowed values of the `run-at` directive
///
/// This is a convenience for callers; the header builder accepts any text
/// for `run-at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunAt {
    DocumentStart,
    DocumentBody,
    DocumentEnd,
    DocumentIdle,
    ContextMenu,
}

impl RunAt {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunAt::DocumentStart => "document-start",
            RunAt::DocumentBody => "document-body",
            RunAt::DocumentEnd => "document-end",
            RunAt::DocumentIdle => "document-idle",
            RunAt::ContextMenu => "context-menu",
        }
    }
}

impl fmt::Display for RunAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunAt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "document-start" => Ok(RunAt::DocumentStart),
            "document-body" => Ok(RunAt::DocumentBody),
            "document-end" => Ok(RunAt::DocumentEnd),
            "document-idle" => Ok(RunAt::DocumentIdle),
            "context-menu" => Ok(RunAt::ContextMenu),
            other => Err(Error::InvalidValue {
                key: "run-at".to_string(),
                reason: format!("unknown run-at value '{}'", other),
            }),
        }
    }
}

/// Ordered UserScript header configuration
///
/// Entries keep the order they were added in, which is the order their
/// directive lines appear in the generated header. Adding a key that is
/// already present replaces its value in place.
///
/// # Example
///
/// ```rust
/// use userscript_meta::{HeaderOptions, RunAt};
///
/// let options = HeaderOptions::new()
///     .text("name", "My script")
///     .text("namespace", "https://example.com")
///     .number("version", 3)
///     .list("match", ["https://example.com/*"])
///     .push("run-at", RunAt::DocumentIdle)
///     .flag("noframes");
///
/// assert_eq!(options.len(), 6);
/// assert_eq!(options.entries()[0].0, "name");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderOptions {
    entries: Vec<(String, OptionValue)>,
}

impl HeaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn push(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, Scalar::Text(value.into()))
    }

    /// Add a numeric directive such as `version`
    pub fn number(self, key: impl Into<String>, value: impl Numeric) -> Self {
        let value: Scalar = value.into();
        self.push(key, value)
    }

    /// Add a flag-only directive such as `noframes`
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.push(key, Scalar::Bool(true))
    }

    pub fn list<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(key, OptionValue::List(values))
    }

    pub fn map<I, K, V>(self, key: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        let mut map: Vec<(String, Scalar)> = Vec::new();
        for (sub_key, sub_value) in entries {
            let sub_key = sub_key.into();
            let sub_value = sub_value.into();
            match map.iter_mut().find(|(k, _)| *k == sub_key) {
                Some(existing) => existing.1 = sub_value,
                None => map.push((sub_key, sub_value)),
            }
        }
        self.push(key, OptionValue::Map(map))
    }

    /// Add or replace an entry through a mutable reference
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(String, OptionValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build options from an untyped JSON object
    ///
    /// Entries are converted in document order. The first `null` value or
    /// nested container fails the whole conversion with
    /// [`Error::InvalidValue`].
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| Error::InvalidValue {
            key: String::new(),
            reason: "header options must be a JSON object".to_string(),
        })?;

        let mut options = HeaderOptions::new();
        for (key, value) in object {
            options.insert(key.clone(), OptionValue::from_json(key, value)?);
        }
        Ok(options)
    }
}

impl<'de> Deserialize<'de> for HeaderOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        HeaderOptions::from_json_value(&value).map_err(de::Error::custom)
    }
}
