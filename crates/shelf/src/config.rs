//! Engine configuration.
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! page_size: 50
//! debounce_ms: 300
//! sort:
//!   column: License
//!   dir: asc
//! license_ranks: [CC0, CC, CC-BY, MIT, GPL, Modified-BSD, Apache, Unsplash, Pixabay, Custom, Mixed]
//! parse:
//!   delimiter: ","
//!   tag_delimiter: ","
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shelf_ingest::{ParseOptions, Parser};
use shelf_seeker::{Paginator, RankTable};

use crate::error::{EngineError, Result};
use crate::state::SortState;

/// License names in ascending sort order. Anything not listed sorts last.
pub const DEFAULT_LICENSE_RANKS: [&str; 11] = [
    "CC0",
    "CC",
    "CC-BY",
    "MIT",
    "GPL",
    "Modified-BSD",
    "Apache",
    "Unsplash",
    "Pixabay",
    "Custom",
    "Mixed",
];

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Records per page.
    pub page_size: usize,
    /// Quiet window for name and tags edits, in milliseconds.
    pub debounce_ms: u64,
    /// Sort applied before the user picks a column.
    pub sort: SortState,
    /// Ascending order of the License column.
    pub license_ranks: Vec<String>,
    /// How catalog text is split into records.
    pub parse: ParseOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            sort: SortState::default(),
            license_ranks: DEFAULT_LICENSE_RANKS.iter().map(|s| s.to_string()).collect(),
            parse: ParseOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml).map_err(|e| EngineError::Config {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml).map_err(|err| match err {
            EngineError::Config { message, .. } => EngineError::Config {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.paginator()?;
        self.parser()?;
        if self.sort.column.trim().is_empty() {
            return Err(EngineError::config("sort.column must not be empty"));
        }
        Ok(())
    }

    /// Quiet window for debounced text filters.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn rank_table(&self) -> RankTable {
        RankTable::new(self.license_ranks.iter().cloned())
    }

    pub fn paginator(&self) -> Result<Paginator> {
        Paginator::new(self.page_size).map_err(|e| EngineError::config(e.to_string()))
    }

    pub fn parser(&self) -> Result<Parser> {
        Parser::new(self.parse.clone()).map_err(|e| EngineError::config(e.to_string()))
    }
}
