//! The visible view: filter, sort, then paginate.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use shelf_ingest::Record;
use shelf_seeker::{PageInfo, Paginator, RankTable, Seekable};
use tracing::debug;

use crate::dataset::Dataset;
use crate::state::QueryState;

/// The fixed parts of a computation: page size and license order.
#[derive(Debug, Clone)]
pub struct Rules {
    pub paginator: Paginator,
    pub licenses: RankTable,
}

/// One page of the filtered, sorted record set.
///
/// Holds positions into the shared [`Dataset`] rather than copies.
#[derive(Debug, Clone)]
pub struct Projection {
    dataset: Arc<Dataset>,
    rows: Vec<usize>,
    page: PageInfo,
}

impl Projection {
    /// Computes the projection for `state`, clamping its page.
    pub fn compute(rules: &Rules, state: &QueryState, dataset: &Arc<Dataset>) -> Self {
        let query = state.query(&rules.licenses);
        let selected = query.select(dataset.records(), Record::accessor);
        let (window, page) = rules.paginator.slice(&selected, state.page);

        debug!(
            matched = page.total_items,
            total = dataset.len(),
            page = page.number,
            pages = page.total_pages,
            sort = %state.sort.column,
            dir = %state.sort.dir,
            "recomputed projection"
        );

        Self {
            dataset: Arc::clone(dataset),
            rows: window.to_vec(),
            page,
        }
    }

    /// Records on this page, in display order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        let records = self.dataset.records();
        self.rows.iter().map(move |&index| &records[index])
    }

    /// Positions of this page's records in the dataset.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn page(&self) -> PageInfo {
        self.page
    }

    /// Number of records across all pages.
    pub fn matched(&self) -> usize {
        self.page.total_items
    }

    /// Returns `true` when nothing matched the filters.
    pub fn is_empty(&self) -> bool {
        self.page.total_items == 0
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// A serializable snapshot for rendering layers.
    pub fn view(&self) -> ProjectionView<'_> {
        ProjectionView {
            page: self.page,
            records: self.records().collect(),
        }
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.dataset, &other.dataset)
            && self.rows == other.rows
            && self.page == other.page
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.page.number, self.page.total_pages)
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectionView<'a> {
    pub page: PageInfo,
    pub records: Vec<&'a Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortState;
    use shelf_seeker::Dir;

    fn rules(page_size: usize) -> Rules {
        Rules {
            paginator: Paginator::new(page_size).unwrap(),
            licenses: RankTable::new(["CC0", "MIT", "GPL"]),
        }
    }

    fn dataset(names: &[&str]) -> Arc<Dataset> {
        let records = names
            .iter()
            .map(|name| Record::new(*name, "", "Tools", "MIT", Vec::new()))
            .collect();
        Arc::new(Dataset::new(records, &RankTable::default()))
    }

    #[test]
    fn empty_dataset_is_page_one_of_one() {
        let projection = Projection::compute(&rules(50), &QueryState::default(), &dataset(&[]));
        assert!(projection.is_empty());
        assert_eq!(projection.to_string(), "Page 1 of 1");
        assert_eq!(projection.records().count(), 0);
    }

    #[test]
    fn requested_page_is_clamped() {
        let mut state = QueryState::with_sort(SortState::new("Name", Dir::Asc));
        state.page = 5;
        let projection = Projection::compute(&rules(2), &state, &dataset(&["a", "b", "c"]));
        assert_eq!(projection.page().number, 2);
        let names: Vec<_> = projection.records().map(Record::name).collect();
        assert_eq!(names, vec!["c"]);
    }

    #[test]
    fn equality_is_per_dataset() {
        let data = dataset(&["a"]);
        let state = QueryState::default();
        let a = Projection::compute(&rules(5), &state, &data);
        let b = Projection::compute(&rules(5), &state, &data);
        let c = Projection::compute(&rules(5), &state, &dataset(&["a"]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn view_serializes_page_and_records() {
        let projection =
            Projection::compute(&rules(5), &QueryState::default(), &dataset(&["a", "b"]));
        let json = serde_json::to_value(projection.view()).unwrap();
        assert_eq!(json["page"]["total_items"], 2);
        assert_eq!(json["records"][1]["Name"], "b");
    }
}
