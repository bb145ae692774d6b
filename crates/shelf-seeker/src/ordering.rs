//! Ordering types for result sorting.
//!
//! Provides [`Dir`] for sort direction, [`RankTable`] for fields that follow
//! a fixed vocabulary instead of the alphabet, and [`OrderBy`] which ties a
//! field to a direction and a [`Collation`].

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn toggled(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fixed, ordered vocabulary.
///
/// Known values rank by their position; anything else ranks after every
/// known value and ties with other unknown values. Lookup is exact.
///
/// ```
/// use shelf_seeker::RankTable;
///
/// let ranks = RankTable::new(["CC0", "MIT", "GPL"]);
/// assert_eq!(ranks.rank("MIT"), Some(1));
/// assert_eq!(ranks.rank("Custom"), None);
/// assert!(ranks.compare("GPL", "Custom").is_lt());
/// assert!(ranks.compare("Custom", "Other").is_eq());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl RankTable {
    /// Builds a table from names ordered first to last.
    ///
    /// A name listed twice keeps its first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        RankTable { names, index }
    }

    /// Returns the position of `name`, or `None` when it is unranked.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the sort key for `name`: its rank, or past-the-end when unranked.
    pub fn sort_key(&self, name: &str) -> usize {
        self.rank(name).unwrap_or(usize::MAX)
    }

    /// Compares two names by rank.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Returns the ranked names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of ranked names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is ranked.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// How the values of one field are compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Collation {
    /// Case-insensitive comparison of the string representation.
    #[default]
    Lexical,
    /// Position in a fixed vocabulary.
    Ranked(RankTable),
}

impl Collation {
    /// Compares two field values under this collation.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match self {
            Collation::Lexical => a.sort_text().cmp(&b.sort_text()),
            Collation::Ranked(table) => {
                let key = |v: &Value<'_>| v.as_str().map_or(usize::MAX, |s| table.sort_key(s));
                key(a).cmp(&key(b))
            }
        }
    }
}

/// A single ordering clause specifying a field, direction and collation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
    /// How values of the field compare.
    pub collation: Collation,
}

impl OrderBy {
    /// Creates a new ascending lexical ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending lexical ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new lexical ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
            collation: Collation::Lexical,
        }
    }

    /// Replaces the collation with a rank table.
    pub fn ranked(mut self, table: RankTable) -> Self {
        self.collation = Collation::Ranked(table);
        self
    }

    /// Compares two values according to this ordering.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(self.collation.compare(a, b))
    }
}

/// Compares two items using a list of ordering clauses.
///
/// Uses the first clause as the primary sort key, the second to break ties, etc.
/// If all clauses compare equal, returns `Equal` so a stable sort keeps the
/// input order.
pub fn compare_by_orderings<T, F>(a: &T, b: &T, orderings: &[OrderBy], accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    for order_by in orderings {
        let val_a = accessor(a, &order_by.field);
        let val_b = accessor(b, &order_by.field);

        let ordering = order_by.compare(&val_a, &val_b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
