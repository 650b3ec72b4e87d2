//! Shared state behind every [`LocaleData`](crate::LocaleData) instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use localedata_cache::{CacheRegistry, SharedCache};
use localedata_manifest::RootManifest;
use parking_lot::RwLock;
use tracing::debug;

use crate::RootRegistry;

static GLOBAL: OnceLock<Arc<LocaleDataContext>> = OnceLock::new();

/// Manifest lookup result for one root: `None` when the root has no usable
/// manifest.
pub type ManifestSlot = Option<Arc<RootManifest>>;

/// Roots, caches and manifests shared by the instances built on it.
///
/// Consumer caches and per-root fragment caches live in separate
/// registries, so no consumer name can alias a root.
///
/// The process-wide context is [`LocaleDataContext::global`]. Tests and
/// embedders that need isolation create their own with
/// [`LocaleDataContext::new`].
#[derive(Debug, Default)]
pub struct LocaleDataContext {
    roots: RootRegistry,
    caches: CacheRegistry,
    fragments: CacheRegistry,
    misses: CacheRegistry,
    manifests: RwLock<HashMap<PathBuf, ManifestSlot>>,
    data_epoch: AtomicU64,
}

impl LocaleDataContext {
    /// Creates an isolated context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide context.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// The global root registry.
    pub fn roots(&self) -> &RootRegistry {
        &self.roots
    }

    /// Registry of consumer caches holding resolved results.
    pub fn caches(&self) -> &CacheRegistry {
        &self.caches
    }

    /// Registry of per-root fragment caches, with the ledger of whole-locale
    /// files already read.
    pub fn fragments(&self) -> &CacheRegistry {
        &self.fragments
    }

    /// Fragments found in `root`, keyed by (category, level). Shared by every
    /// consumer whatever decoders it uses.
    pub(crate) fn root_cache(&self, root: &Path) -> SharedCache {
        self.fragments.cache(&root.display().to_string())
    }

    /// Confirmed absences in `root` for consumers trying exactly
    /// `extensions`.
    pub(crate) fn miss_cache(&self, root: &Path, extensions: &[&str]) -> SharedCache {
        self.misses
            .cache(&format!("{} [{}]", root.display(), extensions.join(",")))
    }

    /// The manifest known for `root`, or `None` if it was never looked up.
    pub(crate) fn manifest(&self, root: &Path) -> Option<ManifestSlot> {
        self.manifests.read().get(root).cloned()
    }

    pub(crate) fn store_manifest(&self, root: &Path, manifest: Option<RootManifest>) {
        self.manifests
            .write()
            .insert(root.to_path_buf(), manifest.map(Arc::new));
    }

    /// Counter that changes whenever results derived from roots or cached
    /// fragments may be stale.
    pub(crate) fn generation(&self) -> u64 {
        self.roots.generation() + self.data_epoch.load(Ordering::SeqCst)
    }

    /// Marks derived results stale after fragments were added.
    pub(crate) fn bump_epoch(&self) {
        self.data_epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Empties every cache and forgets loaded files and manifests. Roots are
    /// kept.
    pub fn clear_cache(&self) {
        debug!("Clearing locale data caches");
        self.caches.clear_all();
        self.fragments.clear_all();
        self.misses.clear_all();
        self.manifests.write().clear();
        self.bump_epoch();
    }

    /// Returns the context to its initial state.
    pub fn reset(&self) {
        debug!("Resetting locale data context");
        self.roots.clear();
        self.caches.reset();
        self.fragments.reset();
        self.misses.reset();
        self.manifests.write().clear();
        self.bump_epoch();
    }
}
