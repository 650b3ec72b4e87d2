//! Filesystem loader.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tracing::trace;

use crate::{LoadError, Loader};

/// Loads files from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsLoader {
    sync: bool,
}

impl FsLoader {
    /// Creates a loader supporting both synchronous and asynchronous reads.
    pub fn new() -> Self {
        Self { sync: true }
    }

    /// Creates a loader that only reads asynchronously.
    pub fn async_only() -> Self {
        Self { sync: false }
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found_as_none(path: &Path, result: std::io::Result<String>) -> Result<Option<String>, LoadError> {
    match result {
        Ok(content) => {
            trace!("Loaded {}", path.display());
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LoadError::io(path, e)),
    }
}

#[async_trait]
impl Loader for FsLoader {
    fn name(&self) -> &str {
        "fs"
    }

    fn supports_sync(&self) -> bool {
        self.sync
    }

    fn load_file_sync(&self, path: &Path) -> Result<Option<String>, LoadError> {
        if !self.sync {
            return Err(LoadError::sync_unsupported(self.name()));
        }
        not_found_as_none(path, std::fs::read_to_string(path))
    }

    async fn load_file(&self, path: &Path) -> Result<Option<String>, LoadError> {
        not_found_as_none(path, tokio::fs::read_to_string(path).await)
    }

    async fn is_reachable(&self, root: &Path) -> bool {
        tokio::fs::metadata(root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_load_file_sync() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info.json");
        fs::write(&path, r#"{"a": "b"}"#).unwrap();

        let loader = FsLoader::new();
        assert_eq!(
            loader.load_file_sync(&path).unwrap().as_deref(),
            Some(r#"{"a": "b"}"#)
        );
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let loader = FsLoader::new();
        assert!(loader.load_file_sync(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_async_only_rejects_sync() {
        let dir = tempdir().unwrap();
        let loader = FsLoader::async_only();

        assert!(!loader.supports_sync());
        let err = loader.load_file_sync(&dir.path().join("x.json")).unwrap_err();
        assert!(matches!(err, LoadError::SyncUnsupported(_)));
        assert!(loader.load_files_sync(&[]).is_err());
    }

    #[test]
    fn test_load_files_sync_absorbs_failures() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("root.json");
        fs::write(&present, "{}").unwrap();
        // reading a directory as a file fails with something other than NotFound
        let broken = dir.path().to_path_buf();

        let loader = FsLoader::new();
        let contents = loader
            .load_files_sync(&[Some(present), None, Some(broken), Some(dir.path().join("gone"))])
            .unwrap();

        assert_eq!(contents, vec![Some("{}".to_string()), None, None, None]);
    }

    #[tokio::test]
    async fn test_load_files_keeps_order() {
        let dir = tempdir().unwrap();
        let paths: Vec<Option<PathBuf>> = (0..5)
            .map(|i| {
                let path = dir.path().join(format!("{i}.json"));
                fs::write(&path, i.to_string()).unwrap();
                Some(path)
            })
            .collect();

        let contents = FsLoader::async_only().load_files(&paths).await;
        let expected: Vec<Option<String>> = (0..5).map(|i| Some(i.to_string())).collect();
        assert_eq!(contents, expected);
    }

    #[tokio::test]
    async fn test_is_reachable() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.json");
        fs::write(&file, "{}").unwrap();

        let loader = FsLoader::new();
        assert!(loader.is_reachable(dir.path()).await);
        assert!(!loader.is_reachable(&file).await);
        assert!(!loader.is_reachable(&dir.path().join("missing")).await);
    }
}
