//! Load-once-per-path dataset cache.
//!
//! The cache is an ordinary owned value: whoever drives the pipeline (a CLI
//! handler, the TUI app) holds one and passes it down. Entries are populated on
//! first access and never invalidated. Failed loads are cached as well, so a
//! missing file is reported consistently without re-probing the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ColumnMapping;
use crate::error::AppError;
use crate::io::ingest::{Dataset, load_emissions};

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Result<Dataset, AppError>>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, reading it on first access only.
    ///
    /// The column mapping is only consulted on that first read.
    pub fn get_or_load(&mut self, path: &Path, columns: &ColumnMapping) -> Result<&Dataset, AppError> {
        if !self.entries.contains_key(path) {
            self.loads += 1;
            let loaded = load_emissions(path, columns);
            self.entries.insert(path.to_path_buf(), loaded);
        } else {
            debug!(path = %path.display(), "dataset cache hit");
        }

        match self.entries.get(path) {
            Some(Ok(dataset)) => Ok(dataset),
            Some(Err(err)) => Err(err.clone()),
            None => Err(AppError::data_unavailable(format!(
                "Dataset '{}' is not cached.",
                path.display()
            ))),
        }
    }

    /// Number of distinct paths read so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
