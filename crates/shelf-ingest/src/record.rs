//! Parsed catalog records.
//!
//! A [`Record`] has five known columns (name, link, category, license, tags)
//! which are always strings, plus any number of extra columns kept as typed
//! [`Cell`]s in their original order.

use serde::ser::Serializer;
use serde::Serialize;
use shelf_seeker::{Number, Seekable, Value};

/// Field names understood by [`Record::seeker_field_value`].
pub mod fields {
    /// Display name.
    pub const NAME: &str = "Name";
    /// Homepage or download URL.
    pub const LINK: &str = "Link";
    /// Low-cardinality grouping such as "Tools" or "Libraries".
    pub const CATEGORY: &str = "Category";
    /// License name, ordered by the license rank table.
    pub const LICENSE: &str = "License";
    /// Tag list.
    pub const TAGS: &str = "Tags";

    /// The known columns, in their positional order.
    pub const KNOWN: [&str; 5] = [NAME, LINK, CATEGORY, LICENSE, TAGS];
}

/// A typed value from an extra column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Empty value.
    Null,
    /// Value that parsed entirely as a finite number.
    Number(Number),
    /// Anything else.
    Text(String),
}

impl Cell {
    /// Types an already trimmed value: empty is null, numeric is a number.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Cell::Null;
        }
        match Number::parse(text) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(text.to_string()),
        }
    }

    /// Returns `true` for [`Cell::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    fn as_value(&self) -> Value<'_> {
        match self {
            Cell::Null => Value::None,
            Cell::Number(n) => Value::Number(*n),
            Cell::Text(s) => Value::String(s),
        }
    }
}

/// One catalog entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    name: String,
    link: String,
    category: String,
    license: String,
    tags: Vec<String>,
    #[serde(skip)]
    tags_lower: Vec<String>,
    #[serde(serialize_with = "serialize_extras")]
    extras: Vec<(String, Cell)>,
}

impl Record {
    /// Creates a record; the lowercase tag mirror is derived here, once.
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
        license: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let tags_lower = tags.iter().map(|tag| tag.to_lowercase()).collect();
        Record {
            name: name.into(),
            link: link.into(),
            category: category.into(),
            license: license.into(),
            tags,
            tags_lower,
            extras: Vec::new(),
        }
    }

    /// Appends an extra column.
    pub fn with_extra(mut self, key: impl Into<String>, cell: Cell) -> Self {
        self.extras.push((key.into(), cell));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    /// Tags as written in the source.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Lowercased tags, parallel to [`tags`](Self::tags).
    pub fn tags_lower(&self) -> &[String] {
        &self.tags_lower
    }

    /// Extra columns in source order.
    pub fn extras(&self) -> &[(String, Cell)] {
        &self.extras
    }

    /// Looks up an extra column by key.
    pub fn extra(&self, key: &str) -> Option<&Cell> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, cell)| cell)
    }
}

impl Seekable for Record {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            fields::NAME => Value::String(&self.name),
            fields::LINK => Value::String(&self.link),
            fields::CATEGORY => Value::String(&self.category),
            fields::LICENSE => Value::String(&self.license),
            fields::TAGS => Value::List(&self.tags_lower),
            other => self.extra(other).map_or(Value::None, Cell::as_value),
        }
    }
}

fn serialize_extras<S>(extras: &[(String, Cell)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(extras.iter().map(|(key, cell)| (key, cell)))
}
