//! Query builder and executor.
//!
//! The [`Query`] struct provides a fluent builder API for constructing queries
//! and methods for executing them against collections.

use tracing::trace;

use crate::clause::{tokenize, Clause, ClauseValue};
use crate::op::Op;
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::page::{PageInfo, Paginator};
use crate::value::Value;

/// A query for filtering and ordering collections.
///
/// All clauses must match for an item to be kept; there is no OR group and
/// no negation. Clauses whose value is empty are never added, so an unset
/// filter passes everything through.
///
/// Execution is always total: filtering preserves input order, sorting is
/// stable, and both are re-run from scratch on every call.
///
/// # Example
///
/// ```
/// use shelf_seeker::{Query, Dir};
///
/// let query = Query::new()
///     .and_eq("Category", "tools")
///     .and_contains("Name", "blend")
///     .and_contains_all("Tags", "3d modeling")
///     .order_by("Name", Dir::Asc)
///     .build();
///
/// assert_eq!(query.clauses().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
    orderings: Vec<OrderBy>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Clause builders
    // ========================================================================

    /// Adds a clause unless its value is empty.
    pub fn and(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        let clause = Clause::new(field, op, value);
        if !clause.value.is_empty() {
            self.clauses.push(clause);
        }
        self
    }

    /// Adds a case-insensitive equality clause.
    pub fn and_eq(self, field: &str, value: &str) -> Self {
        self.and(field, Op::Eq, value)
    }

    /// Adds a case-insensitive substring clause.
    pub fn and_contains(self, field: &str, value: &str) -> Self {
        self.and(field, Op::Contains, value)
    }

    /// Adds a clause requiring every token of `text` in a list field.
    ///
    /// `text` is split with [`tokenize`].
    pub fn and_contains_all(self, field: &str, text: &str) -> Self {
        self.and(field, Op::ContainsAll, tokenize(text))
    }

    /// Like [`and_eq`](Self::and_eq) for an optional value.
    pub fn and_eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.and_eq(field, value),
            None => self,
        }
    }

    /// Like [`and_contains`](Self::and_contains) for an optional value.
    pub fn and_contains_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.and_contains(field, value),
            None => self,
        }
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds a lexical ordering clause.
    pub fn order_by(self, field: &str, dir: Dir) -> Self {
        self.order(OrderBy::new(field, dir))
    }

    /// Adds an ascending lexical ordering clause.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Adds a descending lexical ordering clause.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Adds a fully specified ordering clause.
    pub fn order(mut self, order_by: OrderBy) -> Self {
        self.orderings.push(order_by);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the filter clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the ordering clauses.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns `true` if this query has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches every clause.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.clauses
            .iter()
            .all(|clause| clause.matches(&accessor(item, &clause.field)))
    }

    /// Returns the indices of matching items, filtered then sorted.
    ///
    /// Indices refer to positions in `items`. Items that compare equal keep
    /// their relative input order in either direction.
    pub fn select<T, F>(&self, items: &[T], accessor: F) -> Vec<usize>
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let mut selected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(*item, &accessor))
            .map(|(index, _)| index)
            .collect();

        self.sort_indices(items, &mut selected, &accessor);

        trace!(
            matched = selected.len(),
            total = items.len(),
            "query selected items"
        );
        selected
    }

    /// Stable-sorts `indices` (positions in `items`) by the query's orderings.
    pub fn sort_indices<T, F>(&self, items: &[T], indices: &mut [usize], accessor: &F)
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if self.orderings.is_empty() {
            return;
        }
        indices.sort_by(|&a, &b| {
            compare_by_orderings(&items[a], &items[b], &self.orderings, accessor)
        });
    }

    /// Filters a slice, returning references to matching items in sorted order.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.select(items, accessor)
            .into_iter()
            .map(|index| &items[index])
            .collect()
    }

    /// Filters, sorts and returns one page of results with its metadata.
    pub fn page<'a, T, F>(
        &self,
        items: &'a [T],
        accessor: F,
        paginator: &Paginator,
        requested: usize,
    ) -> (Vec<&'a T>, PageInfo)
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let selected = self.select(items, accessor);
        let (window, info) = paginator.slice(&selected, requested);
        (window.iter().map(|&index| &items[index]).collect(), info)
    }

    /// Counts the number of matching items.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }
}
