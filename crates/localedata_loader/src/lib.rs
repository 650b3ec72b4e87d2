//! # localedata_loader
//!
//! I/O layer for localedata.
//!
//! This crate provides:
//! - A [`Loader`] trait that reads raw file content by path, synchronously
//!   where the implementation allows it and asynchronously always
//! - [`FsLoader`] backed by `std::fs` and `tokio::fs`
//! - [`MemoryLoader`] serving content from memory
//! - A [`Decoder`] trait turning file content into data, selected per file
//!   extension through a [`DecoderRegistry`]
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use localedata_loader::{DecoderRegistry, Loader, MemoryLoader};
//!
//! let loader = MemoryLoader::new().with_file("/data/en/info.json", r#"{"a": "b en"}"#);
//! let content = loader.load_file_sync(Path::new("/data/en/info.json")).unwrap();
//!
//! let decoders = DecoderRegistry::default();
//! let data = decoders
//!     .decode(Path::new("/data/en/info.json"), &content.unwrap())
//!     .unwrap();
//! assert_eq!(data, Some(serde_json::json!({"a": "b en"})));
//! ```

mod decode;
mod error;
mod fs;
mod memory;
mod traits;

pub use decode::{DecoderRegistry, JsonDecoder, ModuleDecoder};
pub use error::{DecodeError, LoadError};
pub use fs::FsLoader;
pub use memory::MemoryLoader;
pub use traits::{Decoder, Loader};
