//! Runtime values for the GameLang interpreter.
//!
//! Values have plain copy semantics: every literal evaluation builds a fresh
//! container and a variable lookup hands out a clone. Nothing is shared
//! between bindings.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

/// Insertion-ordered map used for object values.
pub type ValueMap = IndexMap<String, Value>;

/// Runtime value in the GameLang interpreter.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// String value.
    Str(String),
    /// Number value (all numbers are doubles).
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Absence of a value.
    Null,
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Map from string keys to values, in insertion order.
    Map(ValueMap),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a number value.
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items)
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(entries)
    }

    /// Dynamic type name, as reported by the `type` builtin and the debugger.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Map(_) => "object",
        }
    }

    /// Type-aware emptiness: null, `""`, `[]` and `{}` are empty.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Number(_) | Value::Bool(_) => false,
        }
    }

    /// Truthiness used by `assert` and `bool`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Null => false,
            Value::Array(_) | Value::Map(_) => true,
        }
    }

    /// Numeric view of this value.
    ///
    /// Numbers pass through, booleans map to 0/1 and strings are parsed when
    /// they hold a clean numeric literal.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => parse_number(s),
            Value::Null | Value::Array(_) | Value::Map(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Ordering used by `sort`: numbers compare numerically, everything else
    /// by its display text.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

/// Parse a numeric literal, rejecting anything that is not cleanly a number.
///
/// Accepts an optional sign, digits, a decimal point and an exponent. Words
/// such as `inf` or `NaN` are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Render a number the way script authors expect: integral values without a
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "integral and bounded by the check above"
        )]
        let int = n as i64;
        return int.to_string();
    }
    n.to_string()
}

/// Display form of a value nested inside a container: strings are quoted.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{s}\""),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_nested(f, item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    write_nested(f, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests;
