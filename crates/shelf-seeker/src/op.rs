//! Comparison operators for filter clauses.
//!
//! Every operator is case-insensitive. Clause patterns are folded once when
//! the clause is built, field values are folded on each comparison.

/// Comparison operator for a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Whole-value equality, ignoring case.
    Eq,
    /// Substring containment, ignoring case.
    Contains,
    /// Every pattern token is a substring of at least one list item.
    ContainsAll,
}

impl Op {
    /// Returns `true` if this operator compares against string fields.
    pub fn is_string_op(self) -> bool {
        matches!(self, Op::Eq | Op::Contains)
    }

    /// Returns `true` if this operator compares against list fields.
    pub fn is_list_op(self) -> bool {
        matches!(self, Op::ContainsAll)
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Contains => "contains",
            Op::ContainsAll => "contains_all",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
