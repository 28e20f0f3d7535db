//! Secret sources: where the JSON documents fed to the fold come from.

use crate::error::{Error, Result};
use log::debug;
use std::io;
use std::path::PathBuf;

/// A backend that yields one JSON document.
pub trait SecretSource {
    /// Human readable name, used in log lines and errors.
    fn name(&self) -> String;

    /// Fetches the raw document bytes. Validation happens later, in the fold.
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// A JSON file on the local file system, used instead of 1Password.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            Error::IoError(io::Error::new(
                e.kind(),
                format!("failed to read input JSON file {}: {e}", self.path.display()),
            ))
        })
    }
}

/// Fetches every source in order, stopping at the first failure.
pub fn fetch_all(sources: &[Box<dyn SecretSource>]) -> Result<Vec<(String, Vec<u8>)>> {
    sources
        .iter()
        .map(|source| {
            let name = source.name();
            debug!("Fetching {name}");
            source.fetch().map(|bytes| (name, bytes))
        })
        .collect()
}
