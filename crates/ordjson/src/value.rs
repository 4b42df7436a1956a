//! JSON value types.
//!
//! [`Value`] represents any JSON document, plus the `Error` variant the
//! parser returns for malformed input. Numbers keep the textual form they
//! had in the source; strings are byte sequences, so programmatically built
//! trees may carry non-UTF-8 data (the encoder substitutes replacement
//! escapes when writing such bytes back out).

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::num::ParseIntError;

use crate::encoder::encode_string;
use crate::ordered_map::OrderedMap;
use crate::parser;

pub type Array = Vec<Value>;
pub type Map = OrderedMap<Vec<u8>, Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Beyond the six grammar types there is an `Error` variant: the parser
/// reports failure as a first-class value rather than by panicking, so an
/// error composes into larger trees like any other node.
///
/// # Examples
///
/// ```
/// use ordjson::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert(b"key".to_vec(), Value::from("value"));
/// let value = Value::Object(map);
/// assert_eq!(value.to_json(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Error(String),
    Null,
    Boolean(bool),
    /// The number's original textual form, e.g. `"-0.5e+2"`.
    Number(String),
    /// Raw bytes; parser-produced strings are always valid UTF-8.
    String(Vec<u8>),
    Array(Array),
    Object(Map),
}

/// The discriminator of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Error,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

/// Pretty-printing style for [`Value::to_json_with`]: the indent unit and
/// the line terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whitespace {
    /// Two spaces per level, `\n`.
    SpaceLf,
    /// One tab per level, `\n`.
    TabLf,
    /// Two spaces per level, `\r\n`.
    SpaceCrlf,
    /// One tab per level, `\r\n`.
    TabCrlf,
}

impl Whitespace {
    fn indent(self) -> &'static str {
        match self {
            Whitespace::SpaceLf | Whitespace::SpaceCrlf => "  ",
            Whitespace::TabLf | Whitespace::TabCrlf => "\t",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Whitespace::SpaceLf | Whitespace::TabLf => "\n",
            Whitespace::SpaceCrlf | Whitespace::TabCrlf => "\r\n",
        }
    }
}

/// Why a numeric conversion failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberError {
    /// The value is not a `Number`.
    NotANumber,
    /// The number text does not fit the requested type.
    Parse(ParseIntError),
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::NotANumber => f.write_str("value is not a number"),
            NumberError::Parse(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for NumberError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            NumberError::NotANumber => None,
            NumberError::Parse(err) => Some(err),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Error(_) => Kind::Error,
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns `true` if the value is [`Error`](Value::Error).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordjson::{parse, Value};
    ///
    /// assert!(parse(b"nul").is_error());
    /// assert!(!Value::Null.is_error());
    /// ```
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(..))
    }

    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`](Value::Number).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The parser's diagnostic, if this is an `Error`.
    #[must_use]
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Value::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The number's textual form, if this is a `Number`.
    #[must_use]
    pub fn as_number(&self) -> Option<&str> {
        match self {
            Value::Number(text) => Some(text),
            _ => None,
        }
    }

    /// The string's bytes, if this is a `String`.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The string as `&str`, if this is a `String` holding valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(bytes) => core::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Builds a `Number` from its textual form, validating it against the
    /// JSON number grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordjson::Value;
    ///
    /// assert_eq!(
    ///     Value::number_from_str("-0.5e+2"),
    ///     Some(Value::Number("-0.5e+2".into()))
    /// );
    /// assert_eq!(Value::number_from_str("01"), None);
    /// ```
    #[must_use]
    pub fn number_from_str(text: &str) -> Option<Value> {
        match parser::parse(text.as_bytes()) {
            number @ Value::Number(_) => Some(number),
            _ => None,
        }
    }

    pub fn to_i32(&self) -> Result<i32, NumberError> {
        self.number_text()?.parse().map_err(NumberError::Parse)
    }

    pub fn to_u32(&self) -> Result<u32, NumberError> {
        self.number_text()?.parse().map_err(NumberError::Parse)
    }

    pub fn to_i64(&self) -> Result<i64, NumberError> {
        self.number_text()?.parse().map_err(NumberError::Parse)
    }

    pub fn to_u64(&self) -> Result<u64, NumberError> {
        self.number_text()?.parse().map_err(NumberError::Parse)
    }

    fn number_text(&self) -> Result<&str, NumberError> {
        self.as_number().ok_or(NumberError::NotANumber)
    }

    /// Renders canonical JSON: no whitespace, object keys in insertion
    /// order, numbers exactly as stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordjson::parse;
    ///
    /// let value = parse(b" [ 1 , \"x\" ] ");
    /// assert_eq!(value.to_json(), r#"[1,"x"]"#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    /// Renders JSON with one entry per line, indented by nesting depth.
    #[must_use]
    pub fn to_json_with(&self, style: Whitespace) -> String {
        let mut out = String::new();
        self.write_styled(style, 0, &mut out);
        out
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            Value::Error(message) => out.push_str(&encode_string(message)),
            Value::Null => out.push_str("null"),
            Value::Boolean(true) => out.push_str("true"),
            Value::Boolean(false) => out.push_str("false"),
            Value::Number(text) => out.push_str(text),
            Value::String(bytes) => out.push_str(&encode_string(bytes)),
            Value::Array(items) => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    item.write_compact(out);
                }
                out.push(']');
            }
            Value::Object(map) => {
                out.push('{');
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    out.push_str(&encode_string(key));
                    out.push(':');
                    value.write_compact(out);
                }
                out.push('}');
            }
        }
    }

    fn write_styled(&self, style: Whitespace, depth: usize, out: &mut String) {
        match self {
            Value::Array(items) if !items.is_empty() => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    out.push_str(style.terminator());
                    push_indent(style, depth + 1, out);
                    item.write_styled(style, depth + 1, out);
                }
                out.push_str(style.terminator());
                push_indent(style, depth, out);
                out.push(']');
            }
            Value::Object(map) if !map.is_empty() => {
                out.push('{');
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    out.push_str(style.terminator());
                    push_indent(style, depth + 1, out);
                    out.push_str(&encode_string(key));
                    out.push(':');
                    value.write_styled(style, depth + 1, out);
                }
                out.push_str(style.terminator());
                push_indent(style, depth, out);
                out.push('}');
            }
            _ => self.write_compact(out),
        }
    }
}

fn push_indent(style: Whitespace, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(style.indent());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Object(value)
    }
}
