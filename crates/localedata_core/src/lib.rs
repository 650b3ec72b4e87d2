//! # localedata_core
//!
//! Locale data resolution engine.
//!
//! This crate provides:
//! - The [`LocaleData`] resolver
//! - Configuration loading
//! - Global data roots shared across consumers
//! - Hierarchical merging of locale data
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use localedata_core::{
//!     LoadParams, LocaleData, LocaleDataConfig, LocaleDataContext, MemoryLoader,
//! };
//! use serde_json::json;
//!
//! let loader = MemoryLoader::new()
//!     .with_file("/pkg/info.json", r#"{"a": "b", "c": "d"}"#)
//!     .with_file("/pkg/en/info.json", r#"{"a": "b en"}"#)
//!     .with_file("/pkg/en/US/info.json", r#"{"c": "d en-US"}"#);
//!
//! let data = LocaleData::with_context(
//!     LocaleDataConfig::new("my-package", "/pkg"),
//!     Arc::new(loader),
//!     Arc::new(LocaleDataContext::new()),
//! )?;
//!
//! let info = data.load_data_sync(LoadParams::new("info").locale("en-US"))?;
//! assert_eq!(info, Some(json!({"a": "b en", "c": "d en-US"})));
//! # Ok::<(), localedata_core::LocaleDataError>(())
//! ```

mod config;
pub mod context;
mod error;
mod locale_data;
pub mod merge;
mod paths;
mod roots;

pub use config::LocaleDataConfig;
pub use context::LocaleDataContext;
pub use error::LocaleDataError;
pub use locale_data::{LoadMode, LoadParams, LocaleData};
pub use merge::{LevelView, LocaleViews, MergeOptions, cascade, merge_and_prune_locales};
pub use roots::RootRegistry;

pub use localedata_cache::CacheEntry;
pub use localedata_loader::{
    DecoderRegistry, FsLoader, JsonDecoder, LoadError, Loader, MemoryLoader, ModuleDecoder,
};
pub use localedata_locale::{LocaleSpec, current_locale, sublocales};
