//! The pure state machine: `(state, dataset, event) -> (state, projection)`.

use std::sync::Arc;

use shelf_ingest::Record;
use shelf_seeker::Seekable;

use crate::dataset::Dataset;
use crate::event::Event;
use crate::projection::{Projection, Rules};
use crate::state::{Filters, QueryState};

/// Applies `event` to `state` without touching data.
///
/// Returns the next state and whether a filter or the sort changed, in
/// which case the page has already been reset to 1. Page navigation is
/// left to [`transition`], which knows how many pages exist.
pub fn apply(state: &QueryState, event: &Event) -> (QueryState, bool) {
    let mut next = state.clone();
    match event {
        Event::SetCategory(value) => next.filters.category = normalize(value),
        Event::SetLicense(value) => next.filters.license = normalize(value),
        Event::SetText(edit) => {
            if let Some(name) = &edit.name {
                next.filters.name = name.clone();
            }
            if let Some(tags) = &edit.tags {
                next.filters.tags = tags.clone();
            }
        }
        Event::ClearFilters => next.filters = Filters::default(),
        Event::SortBy(column) => next.sort = state.sort.select(column),
        Event::GoToPage(number) => next.page = *number,
        Event::NextPage | Event::PrevPage => {}
    }

    let changed = next.filters != state.filters || next.sort != state.sort;
    if changed {
        next.page = 1;
    }
    (next, changed)
}

/// Computes the state and projection that follow `event`.
pub fn transition(
    rules: &Rules,
    state: &QueryState,
    dataset: &Arc<Dataset>,
    event: &Event,
) -> (QueryState, Projection) {
    let (mut next, _) = apply(state, event);

    if matches!(event, Event::NextPage | Event::PrevPage) {
        let count = next.query(&rules.licenses).count(dataset.records(), Record::accessor);
        next.page = if *event == Event::NextPage {
            rules.paginator.next(count, next.page)
        } else {
            rules.paginator.prev(count, next.page)
        };
    }

    let projection = Projection::compute(rules, &next, dataset);
    next.page = projection.page().number;
    (next, projection)
}

fn normalize(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortState;
    use shelf_seeker::{Dir, Paginator, RankTable};

    fn rules(page_size: usize) -> Rules {
        Rules {
            paginator: Paginator::new(page_size).unwrap(),
            licenses: RankTable::new(["CC0", "MIT", "GPL"]),
        }
    }

    fn numbered(count: usize) -> Arc<Dataset> {
        let records = (0..count)
            .map(|i| Record::new(format!("item {i:02}"), "", "Tools", "MIT", Vec::new()))
            .collect();
        Arc::new(Dataset::new(records, &RankTable::default()))
    }

    #[test]
    fn filter_change_resets_page() {
        let state = QueryState {
            page: 3,
            ..QueryState::default()
        };
        let (next, changed) = apply(&state, &Event::name("item"));
        assert!(changed);
        assert_eq!(next.page, 1);
    }

    #[test]
    fn unchanged_filter_keeps_page() {
        let state = QueryState {
            page: 3,
            ..QueryState::default()
        };
        let (next, changed) = apply(&state, &Event::SetCategory(None));
        assert!(!changed);
        assert_eq!(next.page, 3);
    }

    #[test]
    fn empty_selection_clears_the_filter() {
        let (next, _) = apply(&QueryState::default(), &Event::category("Tools"));
        let (next, changed) = apply(&next, &Event::category(""));
        assert!(changed);
        assert_eq!(next.filters.category, None);
    }

    #[test]
    fn sort_toggles_and_resets_page() {
        let state = QueryState {
            page: 2,
            ..QueryState::default()
        };
        let (next, changed) = apply(&state, &Event::sort_by("License"));
        assert!(changed);
        assert_eq!(next.sort, SortState::new("License", Dir::Desc));
        assert_eq!(next.page, 1);
    }

    #[test]
    fn next_and_prev_stay_in_range() {
        let rules = rules(5);
        let data = numbered(12);
        let state = QueryState::default();

        let (state, projection) = transition(&rules, &state, &data, &Event::NextPage);
        assert_eq!(state.page, 2);
        assert_eq!(projection.rows(), &[5, 6, 7, 8, 9]);

        let (state, _) = transition(&rules, &state, &data, &Event::NextPage);
        let (state, projection) = transition(&rules, &state, &data, &Event::NextPage);
        assert_eq!(state.page, 3);
        assert_eq!(projection.rows(), &[10, 11]);

        let (state, _) = transition(&rules, &state, &data, &Event::PrevPage);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn go_to_page_is_clamped() {
        let (state, projection) =
            transition(&rules(2), &QueryState::default(), &numbered(4), &Event::GoToPage(5));
        assert_eq!(state.page, 2);
        assert_eq!(projection.page().number, 2);

        let (state, _) =
            transition(&rules(2), &QueryState::default(), &numbered(4), &Event::GoToPage(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn clear_filters_keeps_sort() {
        let state = QueryState {
            filters: Filters {
                name: "x".to_string(),
                ..Filters::default()
            },
            sort: SortState::new("Name", Dir::Desc),
            page: 1,
        };
        let (next, projection) =
            transition(&rules(50), &state, &numbered(3), &Event::ClearFilters);
        assert!(next.filters.is_empty());
        assert_eq!(next.sort, SortState::new("Name", Dir::Desc));
        assert_eq!(projection.rows(), &[2, 1, 0]);
    }
}
