//! Where catalog text comes from.
//!
//! A [`Source`] is the one collaborator that is allowed to fail: it either
//! hands back the whole text or an error, never partial data.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Produces the raw delimited text of a catalog.
pub trait Source {
    /// Short human-readable description, used in logs and errors.
    fn name(&self) -> String;

    /// Fetches the complete text.
    fn fetch(&mut self) -> Result<String>;
}

/// Reads a catalog from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> Result<String> {
        debug!(path = %self.path.display(), "reading catalog file");
        fs::read_to_string(&self.path).map_err(|source| IngestError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// Serves a catalog already held in memory.
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Source for TextSource {
    fn name(&self) -> String {
        "in-memory text".to_string()
    }

    fn fetch(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }
}

impl<F> Source for F
where
    F: FnMut() -> Result<String>,
{
    fn name(&self) -> String {
        "callback".to_string()
    }

    fn fetch(&mut self) -> Result<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,Link,Category,License,Tags").unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(
            source.fetch().unwrap(),
            "Name,Link,Category,License,Tags\n"
        );
    }

    #[test]
    fn file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileSource::new(dir.path().join("missing.csv"));
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
    }

    #[test]
    fn closures_are_sources() {
        let mut source = || -> Result<String> {
            Err(IngestError::Unavailable {
                name: "sheet".to_string(),
                reason: "offline".to_string(),
            })
        };
        assert!(source.fetch().is_err());
        assert_eq!(Source::name(&source), "callback");
    }

    #[test]
    fn text_source_can_be_fetched_twice() {
        let mut source = TextSource::new("a,b");
        assert_eq!(source.fetch().unwrap(), "a,b");
        assert_eq!(source.fetch().unwrap(), "a,b");
    }
}
