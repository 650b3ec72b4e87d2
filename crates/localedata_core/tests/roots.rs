//! Integration tests for global data roots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use localedata_core::{
    LoadError, LoadParams, LocaleData, LocaleDataConfig, LocaleDataContext, LocaleDataError,
    Loader, MemoryLoader,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn create_locale_data(loader: &Arc<MemoryLoader>, context: &Arc<LocaleDataContext>) -> LocaleData {
    LocaleData::with_context(
        LocaleDataConfig::new("ilib-test", "/pkg"),
        loader.clone(),
        Arc::clone(context),
    )
    .expect("Failed to create locale data")
}

fn layered_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_file("/pkg/info.json", r#"{"x": "pkg root"}"#)
        .with_file("/pkg/en/info.json", r#"{"a": "pkg", "b": "pkg"}"#)
        .with_file("/shared/en/info.json", r#"{"a": "shared"}"#)
}

#[test]
fn test_global_root_outranks_private_root() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    let data = create_locale_data(&loader, &context);

    let result = data
        .load_data_sync(LoadParams::new("info").locale("en"))
        .unwrap();

    // the highest-precedence root supplies the whole level
    assert_eq!(result, Some(json!({"x": "pkg root", "a": "shared"})));
}

#[test]
fn test_cross_roots_merges_within_each_level() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    let data = create_locale_data(&loader, &context);

    let result = data
        .load_data_sync(LoadParams::new("info").locale("en").cross_roots(true))
        .unwrap();

    assert_eq!(
        result,
        Some(json!({"x": "pkg root", "a": "shared", "b": "pkg"}))
    );
}

#[test]
fn test_cross_roots_only_with_cascade() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    let data = create_locale_data(&loader, &context);

    let err = data
        .load_data_sync(
            LoadParams::new("info")
                .locale("en")
                .most_specific()
                .cross_roots(true),
        )
        .unwrap_err();

    assert!(matches!(err, LocaleDataError::InvalidOptions(_)));
}

#[test]
fn test_most_specific_prefers_highest_precedence_root() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    let data = create_locale_data(&loader, &context);

    let result = data
        .load_data_sync(LoadParams::new("info").locale("en-US").most_specific())
        .unwrap();

    assert_eq!(result, Some(json!({"a": "shared"})));
}

#[test]
fn test_later_roots_take_precedence() {
    let loader = Arc::new(
        layered_loader().with_file("/newer/en/info.json", r#"{"a": "newer"}"#),
    );
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    context.roots().add("/newer");
    let data = create_locale_data(&loader, &context);

    assert_eq!(
        data.roots(),
        vec!["/newer", "/shared", "/pkg"]
            .into_iter()
            .map(std::path::PathBuf::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(
        data.load_data_sync(LoadParams::new("info").locale("en").most_specific())
            .unwrap(),
        Some(json!({"a": "newer"}))
    );
}

#[test]
fn test_root_added_after_construction() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    let data = create_locale_data(&loader, &context);
    let params = LoadParams::new("info").locale("en");

    assert_eq!(
        data.load_data_sync(params.clone()).unwrap(),
        Some(json!({"x": "pkg root", "a": "pkg", "b": "pkg"}))
    );

    context.roots().add("/shared");
    assert_eq!(
        data.load_data_sync(params).unwrap(),
        Some(json!({"x": "pkg root", "a": "shared"}))
    );
}

#[test]
fn test_removed_root_is_no_longer_searched() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    let data = create_locale_data(&loader, &context);
    let params = LoadParams::new("info").locale("en").most_specific();

    assert_eq!(
        data.load_data_sync(params.clone()).unwrap(),
        Some(json!({"a": "shared"}))
    );

    assert!(context.roots().remove("/shared"));
    assert_eq!(
        data.load_data_sync(params).unwrap(),
        Some(json!({"a": "pkg", "b": "pkg"}))
    );
}

#[test]
fn test_private_root_registered_globally_is_searched_once() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/pkg");
    let data = create_locale_data(&loader, &context);

    assert_eq!(data.roots(), vec![std::path::PathBuf::from("/pkg")]);
    data.load_data_sync(LoadParams::new("info").locale("en"))
        .unwrap();
    assert_eq!(loader.fetch_count("/pkg/en/info.json"), 1);
}

#[test]
fn test_reset_forgets_roots_and_data() {
    let loader = Arc::new(layered_loader());
    let context = Arc::new(LocaleDataContext::new());
    context.roots().add("/shared");
    let data = create_locale_data(&loader, &context);
    let params = LoadParams::new("info").locale("en").most_specific();

    data.load_data_sync(params.clone()).unwrap();
    context.reset();

    assert!(context.roots().is_empty());
    assert!(!data.check_cache("en", Some("info")));
    assert_eq!(
        data.load_data_sync(params).unwrap(),
        Some(json!({"a": "pkg", "b": "pkg"}))
    );
}

/// Registers a global root the first time `trigger` is read.
struct RootAddingLoader {
    inner: MemoryLoader,
    context: Arc<LocaleDataContext>,
    trigger: PathBuf,
    root: PathBuf,
}

impl RootAddingLoader {
    fn on_read(&self, path: &Path) {
        if path == self.trigger {
            self.context.roots().add(&self.root);
        }
    }
}

#[async_trait]
impl Loader for RootAddingLoader {
    fn name(&self) -> &str {
        "root-adding"
    }

    fn supports_sync(&self) -> bool {
        true
    }

    fn load_file_sync(&self, path: &Path) -> Result<Option<String>, LoadError> {
        self.on_read(path);
        self.inner.load_file_sync(path)
    }

    async fn load_file(&self, path: &Path) -> Result<Option<String>, LoadError> {
        self.on_read(path);
        self.inner.load_file(path).await
    }

    async fn is_reachable(&self, root: &Path) -> bool {
        self.inner.is_reachable(root).await
    }
}

#[test]
fn test_root_added_during_load_is_seen_by_next_load() {
    let context = Arc::new(LocaleDataContext::new());
    let loader = Arc::new(RootAddingLoader {
        inner: MemoryLoader::new()
            .with_file("/pkg/en/info.json", r#"{"a": "pkg"}"#)
            .with_file("/shared/en/info.json", r#"{"a": "shared"}"#),
        context: Arc::clone(&context),
        trigger: PathBuf::from("/pkg/en/info.json"),
        root: PathBuf::from("/shared"),
    });
    let data = LocaleData::with_context(
        LocaleDataConfig::new("ilib-test", "/pkg"),
        loader,
        Arc::clone(&context),
    )
    .expect("Failed to create locale data");
    let params = LoadParams::new("info").locale("en");

    // planned before the root existed
    assert_eq!(
        data.load_data_sync(params.clone()).unwrap(),
        Some(json!({"a": "pkg"}))
    );
    assert_eq!(context.roots().roots(), vec![PathBuf::from("/shared")]);
    assert_eq!(
        data.load_data_sync(params).unwrap(),
        Some(json!({"a": "shared"}))
    );
}
