//! The record set of one load and the option lists derived from it.

use std::collections::HashSet;

use serde::Serialize;
use shelf_ingest::Record;
use shelf_seeker::RankTable;

/// Distinct values offered by the category and license selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Non-empty categories, lexicographic.
    pub categories: Vec<String>,
    /// Non-empty licenses by rank; unranked ones last, in first-seen order.
    pub licenses: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record], licenses: &RankTable) -> Self {
        let mut categories = distinct(records.iter().map(Record::category));
        categories.sort();

        let mut license_names = distinct(records.iter().map(Record::license));
        license_names.sort_by(|a, b| licenses.compare(a, b));

        Self {
            categories,
            licenses: license_names,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Immutable record set plus its filter options. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    options: FilterOptions,
}

impl Dataset {
    pub fn new(records: Vec<Record>, licenses: &RankTable) -> Self {
        let options = FilterOptions::from_records(&records, licenses);
        Self { records, options }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, license: &str) -> Record {
        Record::new(name, "", category, license, Vec::new())
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let records = vec![
            record("a", "Tools", "MIT"),
            record("b", "Assets", "MIT"),
            record("c", "", "MIT"),
            record("d", "Tools", "MIT"),
        ];
        let options = FilterOptions::from_records(&records, &RankTable::default());
        assert_eq!(options.categories, vec!["Assets", "Tools"]);
    }

    #[test]
    fn licenses_follow_rank_then_first_seen() {
        let table = RankTable::new(["CC0", "MIT", "GPL"]);
        let records = vec![
            record("a", "", "Zlib"),
            record("b", "", "GPL"),
            record("c", "", "Beerware"),
            record("d", "", "CC0"),
            record("e", "", ""),
            record("f", "", "GPL"),
        ];
        let options = FilterOptions::from_records(&records, &table);
        assert_eq!(options.licenses, vec!["CC0", "GPL", "Zlib", "Beerware"]);
    }

    #[test]
    fn empty_dataset_has_no_options() {
        let dataset = Dataset::new(Vec::new(), &RankTable::default());
        assert!(dataset.is_empty());
        assert_eq!(dataset.options(), &FilterOptions::default());
    }
}
