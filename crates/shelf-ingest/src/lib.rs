//! Catalog ingestion: delimited text in, [`Record`]s out.
//!
//! This crate turns the raw text of a catalog (usually CSV exported from a
//! spreadsheet) into immutable records the query engine can filter and sort.
//!
//! # Features
//!
//! - **Tolerant parsing**: short rows, nameless rows and unterminated quotes
//!   are recovered locally and counted in a [`ParseReport`]
//! - **Header detection**: header row taken from the text, or recognized by
//!   a token in its first column when headers are configured
//! - **Typed extras**: columns past the known five keep their values as
//!   null, number or text
//! - **Sources**: [`FileSource`], [`TextSource`] or any closure
//!
//! # Example
//!
//! ```
//! use shelf_ingest::{fields, ParseOptions, Parser, Source, TextSource};
//!
//! let mut source = TextSource::new(
//!     "Name,Link,Category,License,Tags\nKrita,https://krita.org,Tools,GPL,paint\n",
//! );
//! let parser = Parser::new(ParseOptions::default())?;
//! let report = parser.parse(&source.fetch()?);
//!
//! assert_eq!(report.records[0].name(), "Krita");
//! assert_eq!(fields::KNOWN[0], fields::NAME);
//! # Ok::<(), shelf_ingest::IngestError>(())
//! ```

mod error;
mod parser;
mod record;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use parser::{parse_text, ParseOptions, ParseReport, Parser};

// === Records ===
pub use record::{fields, Cell, Record};

// === Sources ===
pub use source::{FileSource, Source, TextSource};
