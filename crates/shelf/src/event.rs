//! User intents that change the query state.

use serde::{Deserialize, Serialize};

/// Pending text-filter input. `None` leaves that filter unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub name: Option<String>,
    pub tags: Option<String>,
}

impl TextEdit {
    /// Folds a later edit into this one; the later value wins per field.
    pub fn merge(&mut self, later: TextEdit) {
        if later.name.is_some() {
            self.name = later.name;
        }
        if later.tags.is_some() {
            self.tags = later.tags;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.tags.is_none()
    }
}

/// One input to [`transition`](crate::transition).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// Select a category, or `None`/empty for all.
    SetCategory(Option<String>),
    /// Select a license, or `None`/empty for all.
    SetLicense(Option<String>),
    /// Replace the name and/or tags text.
    SetText(TextEdit),
    /// Drop every filter, keeping the sort.
    ClearFilters,
    /// Sort by a column, toggling direction if it is already active.
    SortBy(String),
    NextPage,
    PrevPage,
    /// Jump to a page; out-of-range numbers are clamped.
    GoToPage(usize),
}

impl Event {
    pub fn name(text: impl Into<String>) -> Self {
        Event::SetText(TextEdit {
            name: Some(text.into()),
            tags: None,
        })
    }

    pub fn tags(text: impl Into<String>) -> Self {
        Event::SetText(TextEdit {
            name: None,
            tags: Some(text.into()),
        })
    }

    pub fn category(value: impl Into<String>) -> Self {
        Event::SetCategory(Some(value.into()))
    }

    pub fn license(value: impl Into<String>) -> Self {
        Event::SetLicense(Some(value.into()))
    }

    pub fn sort_by(column: impl Into<String>) -> Self {
        Event::SortBy(column.into())
    }

    /// Returns `true` for page navigation, which never resets the page.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Event::NextPage | Event::PrevPage | Event::GoToPage(_))
    }
}
