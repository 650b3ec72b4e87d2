//! In-memory loader.

use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::{LoadError, Loader};

/// Serves file content from memory and counts every fetch.
///
/// A root is reachable when at least one file lives under it or it was
/// registered with [`MemoryLoader::with_root`].
#[derive(Debug)]
pub struct MemoryLoader {
    sync: bool,
    files: RwLock<HashMap<PathBuf, String>>,
    roots: RwLock<HashSet<PathBuf>>,
    failing: RwLock<HashSet<PathBuf>>,
    fetches: Mutex<HashMap<PathBuf, usize>>,
}

impl MemoryLoader {
    /// Creates an empty loader supporting synchronous reads.
    pub fn new() -> Self {
        Self {
            sync: true,
            files: RwLock::new(HashMap::new()),
            roots: RwLock::new(HashSet::new()),
            failing: RwLock::new(HashSet::new()),
            fetches: Mutex::new(HashMap::new()),
        }
    }

    /// Disables synchronous reads.
    pub fn async_only(mut self) -> Self {
        self.sync = false;
        self
    }

    /// Adds a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Marks an otherwise empty directory as reachable.
    pub fn with_root(self, root: impl Into<PathBuf>) -> Self {
        self.roots.write().insert(root.into());
        self
    }

    /// Makes every read of `path` fail with an I/O error.
    pub fn with_failure(self, path: impl Into<PathBuf>) -> Self {
        self.failing.write().insert(path.into());
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.write().insert(path.into(), content.into());
    }

    /// Number of times `path` was fetched, found or not.
    pub fn fetch_count(&self, path: impl AsRef<Path>) -> usize {
        self.fetches.lock().get(path.as_ref()).copied().unwrap_or(0)
    }

    /// Number of fetches across all paths.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().values().sum()
    }

    /// Forgets all fetch counts.
    pub fn reset_counts(&self) {
        self.fetches.lock().clear();
    }

    fn read(&self, path: &Path) -> Result<Option<String>, LoadError> {
        *self.fetches.lock().entry(path.to_path_buf()).or_default() += 1;

        if self.failing.read().contains(path) {
            return Err(LoadError::io(path, Error::new(ErrorKind::PermissionDenied, "injected failure")));
        }
        Ok(self.files.read().get(path).cloned())
    }
}

impl Default for MemoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Loader for MemoryLoader {
    fn name(&self) -> &str {
        "memory"
    }

    fn supports_sync(&self) -> bool {
        self.sync
    }

    fn load_file_sync(&self, path: &Path) -> Result<Option<String>, LoadError> {
        if !self.sync {
            return Err(LoadError::sync_unsupported(self.name()));
        }
        self.read(path)
    }

    async fn load_file(&self, path: &Path) -> Result<Option<String>, LoadError> {
        tokio::task::yield_now().await;
        self.read(path)
    }

    async fn is_reachable(&self, root: &Path) -> bool {
        self.roots.read().contains(root) || self.files.read().keys().any(|path| path.starts_with(root))
    }
}
