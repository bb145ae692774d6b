//! Seeker - filter, sort and paginate in-memory record collections.
//!
//! Seeker provides a fluent API for building queries against slices of
//! records and slicing the results into fixed-size pages. It supports:
//!
//! - Case-insensitive equality and substring matching on string fields
//! - Token-set matching on list fields (every token must be found)
//! - Lexical or rank-table ordering with ascending/descending direction
//! - Stable sorting, so equal keys keep their input order
//! - Clamped, 1-based pagination that always reports at least one page
//!
//! # Quick Start
//!
//! ```rust
//! use shelf_seeker::{Query, OrderBy, Paginator, RankTable, Value};
//!
//! struct Asset {
//!     name: String,
//!     license: String,
//! }
//!
//! fn accessor<'a>(asset: &'a Asset, field: &str) -> Value<'a> {
//!     match field {
//!         "Name" => Value::String(&asset.name),
//!         "License" => Value::String(&asset.license),
//!         _ => Value::None,
//!     }
//! }
//!
//! let assets = vec![
//!     Asset { name: "Inkscape".into(), license: "GPL".into() },
//!     Asset { name: "Kenney".into(), license: "CC0".into() },
//!     Asset { name: "raylib".into(), license: "MIT".into() },
//! ];
//!
//! let licenses = RankTable::new(["CC0", "MIT", "GPL"]);
//! let query = Query::new()
//!     .and_contains("Name", "N")
//!     .order(OrderBy::asc("License").ranked(licenses))
//!     .build();
//!
//! let pages = Paginator::new(50).unwrap();
//! let (items, info) = query.page(&assets, accessor, &pages, 1);
//! assert_eq!(items[0].name, "Kenney");
//! assert_eq!((info.number, info.total_pages), (1, 1));
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = every clause matches
//! ```
//!
//! Clauses with an empty value are dropped when the query is built, so an
//! unset filter is a pass-through.
//!
//! | Operator | Field type | Meaning |
//! |----------|------------|---------|
//! | `Eq` | String, Number | whole value equal, ignoring case |
//! | `Contains` | String, Number | substring, ignoring case |
//! | `ContainsAll` | List | each token is a substring of some item |

mod clause;
mod error;
mod op;
mod ordering;
mod page;
mod query;
mod traits;
mod value;

pub use clause::{tokenize, Clause, ClauseValue};
pub use error::{Result, SeekerError};
pub use op::Op;
pub use ordering::{compare_by_orderings, Collation, Dir, OrderBy, RankTable};
pub use page::{PageInfo, Paginator};
pub use query::Query;
pub use traits::Seekable;
pub use value::{Number, Value};
