//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the runtime value of a field extracted from a
//! record. Records hand out strings, numbers and case-folded token lists; any
//! field they do not know about is [`Value::None`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use shelf_seeker::{Value, Number};
///
/// struct Asset {
///     name: String,
///     stars: u32,
/// }
///
/// fn accessor<'a>(asset: &'a Asset, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&asset.name),
///         "stars" => Value::Number(Number::from(asset.stars)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Ordered list of tokens, already lowercased by the record.
    List(&'a [String]),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the token list, if present.
    pub fn as_list(&self) -> Option<&'a [String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the lowercase string representation used for lexical sorting.
    ///
    /// `None` sorts as the empty string, numbers use their display form and
    /// lists are joined with `", "`.
    pub fn sort_text(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => lowercase(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::List(items) => Cow::Owned(items.join(", ").to_lowercase()),
            Value::None => Cow::Borrowed(""),
        }
    }
}

fn lowercase(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_uppercase) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Numeric value supporting signed, unsigned and floating point storage.
///
/// Numbers only sort and render through their display form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Parses a string that is entirely numeric.
    ///
    /// Integers are preferred over floats; non-finite results (`inf`, `NaN`)
    /// are rejected so that words like "Infinity" stay text.
    pub fn parse(s: &str) -> Option<Number> {
        if let Ok(n) = s.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = s.parse::<u64>() {
            return Some(Number::U64(n));
        }
        match s.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(Number::F64(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}
