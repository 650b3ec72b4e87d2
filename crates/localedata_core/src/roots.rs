//! Registry of global locale data roots.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

/// Ordered list of data roots shared by every [`LocaleData`](crate::LocaleData).
///
/// The most recently added root has the highest precedence. Every change
/// bumps [`RootRegistry::generation`], so readers can tell when results
/// derived from an older root list are stale.
#[derive(Debug, Default)]
pub struct RootRegistry {
    roots: RwLock<Vec<PathBuf>>,
    generation: AtomicU64,
}

impl RootRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `root` ahead of every root added before it.
    ///
    /// Empty paths and roots already present are ignored. Returns true if
    /// the registry changed.
    pub fn add(&self, root: impl AsRef<Path>) -> bool {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return false;
        }

        let mut roots = self.roots.write();
        if roots.iter().any(|known| known == root) {
            return false;
        }
        debug!("Adding global root {}", root.display());
        roots.insert(0, root.to_path_buf());
        self.generation.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Removes `root`. Returns true if it was present.
    pub fn remove(&self, root: impl AsRef<Path>) -> bool {
        let root = root.as_ref();
        let mut roots = self.roots.write();
        let before = roots.len();
        roots.retain(|known| known != root);
        if roots.len() == before {
            return false;
        }
        debug!("Removed global root {}", root.display());
        self.generation.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Removes every root.
    pub fn clear(&self) {
        let mut roots = self.roots.write();
        if !roots.is_empty() {
            roots.clear();
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// The global roots, highest precedence first.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.roots.read().clone()
    }

    /// The global roots followed by `private`, which they all outrank.
    pub fn roots_with(&self, private: &Path) -> Vec<PathBuf> {
        let mut roots = self.roots();
        if !roots.iter().any(|root| root == private) {
            roots.push(private.to_path_buf());
        }
        roots
    }

    /// Number of global roots.
    pub fn len(&self) -> usize {
        self.roots.read().len()
    }

    /// Returns true if there are no global roots.
    pub fn is_empty(&self) -> bool {
        self.roots.read().is_empty()
    }

    /// Counter bumped on every change to the root list.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_add_prepends() {
        let registry = RootRegistry::new();
        assert!(registry.add("/a"));
        assert!(registry.add("/b"));
        assert_eq!(registry.roots(), paths(&["/b", "/a"]));
    }

    #[test]
    fn test_add_is_idempotent() {
        let registry = RootRegistry::new();
        registry.add("/a");
        registry.add("/b");
        let generation = registry.generation();

        assert!(!registry.add("/a"));
        assert_eq!(registry.roots(), paths(&["/b", "/a"]));
        assert_eq!(registry.generation(), generation);
    }

    #[test]
    fn test_empty_root_is_ignored() {
        let registry = RootRegistry::new();
        assert!(!registry.add(""));
        assert!(!registry.remove(""));
        assert!(registry.is_empty());
        assert_eq!(registry.generation(), 0);
    }

    #[test]
    fn test_remove() {
        let registry = RootRegistry::new();
        registry.add("/a");
        registry.add("/b");

        assert!(registry.remove("/a"));
        assert_eq!(registry.roots(), paths(&["/b"]));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let registry = RootRegistry::new();
        registry.add("/a");
        let generation = registry.generation();

        assert!(!registry.remove("/never-added"));
        assert_eq!(registry.roots(), paths(&["/a"]));
        assert_eq!(registry.generation(), generation);
    }

    #[test]
    fn test_clear() {
        let registry = RootRegistry::new();
        registry.add("/a");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_private_root_comes_last() {
        let registry = RootRegistry::new();
        registry.add("/global1");
        registry.add("/global2");

        assert_eq!(
            registry.roots_with(Path::new("/pkg/locale")),
            paths(&["/global2", "/global1", "/pkg/locale"])
        );
    }

    #[test]
    fn test_private_root_not_duplicated() {
        let registry = RootRegistry::new();
        registry.add("/pkg/locale");
        registry.add("/other");

        assert_eq!(
            registry.roots_with(Path::new("/pkg/locale")),
            paths(&["/other", "/pkg/locale"])
        );
    }
}
