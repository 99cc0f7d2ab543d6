//! Error types for vars-fs

use std::path::PathBuf;

/// Result type for vars-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a vars file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Expected a mapping at {path}, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
