//! Loader and decoder trait definitions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::Value;
use tracing::warn;

use crate::{DecodeError, LoadError};

/// Reads raw file content by path.
///
/// A missing file is not an error: it loads as `Ok(None)`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use async_trait::async_trait;
/// use localedata_loader::{LoadError, Loader};
///
/// struct Empty;
///
/// #[async_trait]
/// impl Loader for Empty {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn supports_sync(&self) -> bool {
///         true
///     }
///
///     fn load_file_sync(&self, _path: &Path) -> Result<Option<String>, LoadError> {
///         Ok(None)
///     }
///
///     async fn load_file(&self, _path: &Path) -> Result<Option<String>, LoadError> {
///         Ok(None)
///     }
///
///     async fn is_reachable(&self, _root: &Path) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// Returns the name of this loader.
    fn name(&self) -> &str;

    /// Returns true if [`Loader::load_file_sync`] can be used.
    fn supports_sync(&self) -> bool;

    /// Reads a file, blocking the caller.
    ///
    /// Loaders without synchronous support return
    /// [`LoadError::SyncUnsupported`].
    fn load_file_sync(&self, path: &Path) -> Result<Option<String>, LoadError>;

    /// Reads a file.
    async fn load_file(&self, path: &Path) -> Result<Option<String>, LoadError>;

    /// Returns true if `root` can be read from at all.
    async fn is_reachable(&self, root: &Path) -> bool;

    /// Reads several files, blocking the caller.
    ///
    /// The result is index-aligned with `paths`. `None` paths are skipped,
    /// and files that fail to load are logged and come back as `None`.
    fn load_files_sync(&self, paths: &[Option<PathBuf>]) -> Result<Vec<Option<String>>, LoadError> {
        if !self.supports_sync() {
            return Err(LoadError::sync_unsupported(self.name()));
        }

        Ok(paths
            .iter()
            .map(|path| {
                let path = path.as_deref()?;
                absorb(path, self.load_file_sync(path))
            })
            .collect())
    }

    /// Reads several files concurrently.
    ///
    /// The result is index-aligned with `paths` regardless of completion
    /// order. `None` paths are skipped, and files that fail to load are
    /// logged and come back as `None`.
    async fn load_files(&self, paths: &[Option<PathBuf>]) -> Vec<Option<String>> {
        let fetches = paths.iter().map(|path| async move {
            let path = path.as_deref()?;
            absorb(path, self.load_file(path).await)
        });
        join_all(fetches).await
    }
}

fn absorb(path: &Path, result: Result<Option<String>, LoadError>) -> Option<String> {
    match result {
        Ok(content) => content,
        Err(e) => {
            warn!("Treating {} as absent: {}", path.display(), e);
            None
        }
    }
}

/// Turns file content into data.
pub trait Decoder: Send + Sync {
    /// Returns the name of this decoder.
    fn name(&self) -> &str;

    /// Returns the file extensions this decoder handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["json"]`).
    fn extensions(&self) -> &[&str];

    /// Decodes `content` read from `path`.
    ///
    /// Returns `Ok(None)` when the content holds no data.
    fn decode(&self, path: &Path, content: &str) -> Result<Option<Value>, DecodeError>;

    /// Returns true if this decoder can handle the given file extension.
    fn can_decode(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
