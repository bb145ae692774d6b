//! Filtered, sorted and paged views over an in-memory asset catalog.
//!
//! An [`Engine`] loads a catalog once from a [`Source`](shelf_ingest::Source),
//! then turns user intents ([`Event`]s) into [`Projection`]s: the records on
//! the visible page, plus page metadata and the total match count.
//!
//! # Architecture
//!
//! The core is a pure function, [`transition`], taking the current
//! [`QueryState`], the shared [`Dataset`] and one event, and returning the next
//! state with its projection. The engine wraps it with:
//!
//! - a load lifecycle, reported through [`Indicator`]
//! - a [`Debouncer`] for name and tags typing
//! - subscribers called with every recomputed projection
//!
//! Every recompute runs the full pipeline (filter, stable sort, paginate)
//! from scratch.
//!
//! # Query semantics
//!
//! | Filter   | Match                                                   |
//! |----------|---------------------------------------------------------|
//! | Category | case-insensitive equality                               |
//! | License  | case-insensitive equality                               |
//! | Name     | case-insensitive substring                              |
//! | Tags     | every comma/space separated token is a substring of a tag |
//!
//! Empty filters match everything. Sorting on the License column follows the
//! configured rank table; other columns compare case-insensitively. Changing
//! a filter or the sort returns to page 1, and any requested page is clamped
//! into range.
//!
//! # Example
//!
//! ```
//! use shelf::{Engine, EngineConfig, Event};
//! use shelf_ingest::TextSource;
//!
//! let config = EngineConfig::from_yaml("page_size: 1")?;
//! let mut engine = Engine::new(&config)?;
//! engine.load(&mut TextSource::new(
//!     "Name,Link,Category,License,Tags\n\
//!      Godot,https://godotengine.org,Engines,MIT,\"2d, 3d\"\n\
//!      Bevy,https://bevyengine.org,Engines,MIT,\"3d, ecs\"\n",
//! ))?;
//!
//! let projection = engine.dispatch(Event::NextPage).unwrap();
//! assert_eq!(projection.to_string(), "Page 2 of 2");
//! assert_eq!(projection.records().next().unwrap().name(), "Bevy");
//! # Ok::<(), shelf::EngineError>(())
//! ```

mod config;
mod dataset;
mod debounce;
mod engine;
mod error;
mod event;
mod projection;
mod state;
mod transition;

// === Configuration ===
pub use config::{EngineConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_LICENSE_RANKS, DEFAULT_PAGE_SIZE};

// === Error Types ===
pub use error::{EngineError, Result};

// === State Machine ===
pub use event::{Event, TextEdit};
pub use state::{Filters, QueryState, SortState};
pub use transition::{apply, transition};

// === Data ===
pub use dataset::{Dataset, FilterOptions};
pub use projection::{Projection, ProjectionView, Rules};

// === Coordination ===
pub use debounce::Debouncer;
pub use engine::{Engine, Indicator, LoadSummary, Subscriber};
