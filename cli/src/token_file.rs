//! Token slot persisted in a plain file between CLI invocations.

#[cfg(test)]
#[path = "token_file_test.rs"]
mod token_file_test;

use std::io;
use std::path::{Path, PathBuf};

use venturedesk::session::TokenStore;

pub const DEFAULT_TOKEN_FILE: &str = ".venturedesk-token";

/// The file holds the raw token and nothing else. A missing file is an empty slot.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Any I/O error other than the file not existing.
    pub fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents.trim_end_matches(['\r', '\n']).to_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// Any I/O error from writing the file.
    pub fn write(&self, token: &str) -> io::Result<()> {
        std::fs::write(&self.path, token)
    }

    /// # Errors
    ///
    /// Any I/O error other than the file already being gone.
    pub fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, token: &str) {
        if let Err(e) = self.write(token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write token file");
        }
    }

    fn get(&self) -> Option<String> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to read token file");
            None
        })
    }

    fn clear(&self) {
        if let Err(e) = self.remove() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token file");
        }
    }
}
