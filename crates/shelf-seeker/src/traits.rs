//! The [`Seekable`] trait gives the engine named access to record fields.

use crate::value::Value;

/// Trait for types that can be filtered and sorted by field name.
///
/// # Example
///
/// ```
/// use shelf_seeker::{Query, Seekable, Value};
///
/// struct Asset {
///     name: String,
///     category: String,
/// }
///
/// impl Seekable for Asset {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "Name" => Value::String(&self.name),
///             "Category" => Value::String(&self.category),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let assets = vec![
///     Asset { name: "Blender".into(), category: "Tools".into() },
///     Asset { name: "SDL".into(), category: "Libraries".into() },
/// ];
///
/// let query = Query::new().and_eq("Category", "tools").build();
/// let results = query.filter(&assets, Asset::accessor);
/// assert_eq!(results.len(), 1);
/// ```
pub trait Seekable {
    /// Returns the value of a field, or [`Value::None`] for unknown fields.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for use with
    /// [`Query::filter`](crate::Query::filter) and friends.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(field)
    }
}
