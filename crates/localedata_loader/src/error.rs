//! Loader and decoder error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the file failed for a reason other than it not existing.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Synchronous loading was requested from a loader that cannot do it.
    #[error("Loader '{0}' does not support synchronous loading")]
    SyncUnsupported(String),
}

impl LoadError {
    /// Creates a new I/O error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new sync-unsupported error.
    pub fn sync_unsupported(loader: impl Into<String>) -> Self {
        Self::SyncUnsupported(loader.into())
    }
}

/// Errors that can occur while decoding file content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The content is not valid for its format.
    #[error("Invalid {format} in {path}: {message}")]
    Syntax {
        /// Format name of the decoder.
        format: String,
        /// The decoded file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// No decoder handles the file's extension.
    #[error("No decoder for {0}")]
    Unsupported(PathBuf),
}

impl DecodeError {
    /// Creates a new syntax error.
    pub fn syntax(format: impl Into<String>, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Syntax {
            format: format.into(),
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a new unsupported-extension error.
    pub fn unsupported(path: impl AsRef<Path>) -> Self {
        Self::Unsupported(path.as_ref().to_path_buf())
    }
}
