//! Query state: the filter, sort and page configuration behind a projection.

use serde::{Deserialize, Serialize};
use shelf_ingest::fields;
use shelf_seeker::{tokenize, Dir, OrderBy, Query, RankTable};

/// Active filters. Empty values are pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Exact, case-insensitive category.
    pub category: Option<String>,
    /// Exact, case-insensitive license.
    pub license: Option<String>,
    /// Case-insensitive substring of the name.
    pub name: String,
    /// Raw tags input; every token must be a substring of some tag.
    pub tags: String,
}

impl Filters {
    /// Returns `true` when no filter narrows the set.
    pub fn is_empty(&self) -> bool {
        self.category.as_deref().map_or(true, str::is_empty)
            && self.license.as_deref().map_or(true, str::is_empty)
            && self.name.is_empty()
            && tokenize(&self.tags).is_empty()
    }

    /// Builds the filter clauses; empty inputs add nothing.
    pub fn to_query(&self) -> Query {
        Query::new()
            .and_eq_opt(fields::CATEGORY, self.category.as_deref())
            .and_eq_opt(fields::LICENSE, self.license.as_deref())
            .and_contains(fields::NAME, &self.name)
            .and_contains_all(fields::TAGS, &self.tags)
    }
}

/// Column and direction of the active sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub dir: Dir,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: fields::LICENSE.to_string(),
            dir: Dir::Asc,
        }
    }
}

impl SortState {
    pub fn new(column: impl Into<String>, dir: Dir) -> Self {
        Self {
            column: column.into(),
            dir,
        }
    }

    /// Sorting by the active column flips direction; any other column
    /// starts ascending.
    pub fn select(&self, column: &str) -> SortState {
        if self.column == column {
            SortState::new(column, self.dir.toggled())
        } else {
            SortState::new(column, Dir::Asc)
        }
    }

    /// The ordering for this sort. License uses the rank table, every other
    /// column compares lexically.
    pub fn ordering(&self, licenses: &RankTable) -> OrderBy {
        let order = OrderBy::new(self.column.as_str(), self.dir);
        if self.column == fields::LICENSE {
            order.ranked(licenses.clone())
        } else {
            order
        }
    }
}

/// Everything that determines a projection besides the data itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub filters: Filters,
    pub sort: SortState,
    /// Requested page, 1-based. Clamped whenever a projection is computed.
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_sort(SortState::default())
    }
}

impl QueryState {
    /// No filters, page 1, the given sort.
    pub fn with_sort(sort: SortState) -> Self {
        Self {
            filters: Filters::default(),
            sort,
            page: 1,
        }
    }

    /// The full filter-and-sort query for this state.
    pub fn query(&self, licenses: &RankTable) -> Query {
        self.filters
            .to_query()
            .order(self.sort.ordering(licenses))
            .build()
    }
}
