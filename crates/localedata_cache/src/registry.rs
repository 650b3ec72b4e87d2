//! Process-wide registry of data caches.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::DataCache;

/// A cache shared between every holder of the same identity.
pub type SharedCache = Arc<Mutex<DataCache>>;

/// Hands out one [`DataCache`] per identity and remembers which
/// whole-locale files have already been loaded.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    caches: RwLock<HashMap<String, SharedCache>>,
    loaded_files: Mutex<HashSet<PathBuf>>,
}

impl CacheRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache for `identity`, creating it on first use.
    pub fn cache(&self, identity: &str) -> SharedCache {
        if let Some(cache) = self.caches.read().get(identity) {
            return Arc::clone(cache);
        }

        let mut caches = self.caches.write();
        let cache = caches.entry(identity.to_string()).or_insert_with(|| {
            debug!("Creating data cache for '{}'", identity);
            Arc::new(Mutex::new(DataCache::new(identity)))
        });
        Arc::clone(cache)
    }

    /// Returns the cache for `identity` if one was created.
    pub fn get(&self, identity: &str) -> Option<SharedCache> {
        self.caches.read().get(identity).cloned()
    }

    /// Lists the identities with a cache, sorted.
    pub fn identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self.caches.read().keys().cloned().collect();
        identities.sort();
        identities
    }

    /// Total number of entries across all caches.
    pub fn total_size(&self) -> usize {
        self.caches.read().values().map(|cache| cache.lock().size()).sum()
    }

    /// Empties every cache in place and forgets loaded files.
    ///
    /// Handles obtained earlier stay valid and see the empty cache.
    pub fn clear_all(&self) {
        debug!("Clearing all data caches");
        for cache in self.caches.read().values() {
            cache.lock().clear();
        }
        self.loaded_files.lock().clear();
    }

    /// Drops every cache and forgets loaded files.
    ///
    /// Handles obtained earlier are detached from the registry.
    pub fn reset(&self) {
        debug!("Resetting cache registry");
        self.caches.write().clear();
        self.loaded_files.lock().clear();
    }

    /// Records that a whole-locale file was loaded. Returns false if it was
    /// already recorded.
    pub fn mark_file_loaded(&self, path: &Path) -> bool {
        self.loaded_files.lock().insert(path.to_path_buf())
    }

    /// Returns true if the file was recorded as loaded.
    pub fn is_file_loaded(&self, path: &Path) -> bool {
        self.loaded_files.lock().contains(path)
    }
}
