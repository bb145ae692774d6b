//! Clause types for filter predicates.
//!
//! A [`Clause`] represents a single filter predicate: a field name,
//! an operator, and a comparison value. Patterns are lowercased when the
//! clause is built so that matching never re-folds them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::op::Op;
use crate::value::Value;

static TOKEN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("token separator pattern is valid"));

/// Splits free-form filter text into lowercase tokens.
///
/// Runs of commas and whitespace separate tokens; empty tokens are dropped.
///
/// ```
/// use shelf_seeker::tokenize;
///
/// assert_eq!(tokenize(" Vector,, Icons  3d "), vec!["vector", "icons", "3d"]);
/// assert!(tokenize(" , ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use shelf_seeker::{Clause, Op, Value};
///
/// let clause = Clause::new("Category", Op::Eq, "Tools");
/// assert!(clause.matches(&Value::String("tools")));
/// assert!(!clause.matches(&Value::String("libraries")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The lowercased value to compare against.
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a new clause, folding the pattern to lowercase.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into().folded(),
        }
    }

    /// Evaluates this clause against a field value.
    ///
    /// Missing fields, mismatched shapes (a text pattern against a list)
    /// and operators of the wrong kind for the field never match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (_, Value::None) => false,

            (ClauseValue::Tokens(tokens), Value::List(items)) if self.op.is_list_op() => {
                tokens
                    .iter()
                    .all(|token| items.iter().any(|item| item.contains(token.as_str())))
            }

            (ClauseValue::Text(pattern), Value::String(_) | Value::Number(_))
                if self.op.is_string_op() =>
            {
                let text = field_value.sort_text();
                match self.op {
                    Op::Contains => text.contains(pattern.as_str()),
                    _ => text == pattern.as_str(),
                }
            }

            _ => false,
        }
    }
}

/// Owned value for storage in a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// Single text pattern.
    Text(String),
    /// Set of tokens that must all be found.
    Tokens(Vec<String>),
}

impl ClauseValue {
    fn folded(self) -> Self {
        match self {
            ClauseValue::Text(text) => ClauseValue::Text(text.to_lowercase()),
            ClauseValue::Tokens(tokens) => {
                ClauseValue::Tokens(tokens.iter().map(|t| t.to_lowercase()).collect())
            }
        }
    }

    /// Returns `true` if the value can never restrict a match.
    pub fn is_empty(&self) -> bool {
        match self {
            ClauseValue::Text(text) => text.is_empty(),
            ClauseValue::Tokens(tokens) => tokens.is_empty(),
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::Text(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for ClauseValue {
    fn from(tokens: Vec<String>) -> Self {
        ClauseValue::Tokens(tokens)
    }
}
