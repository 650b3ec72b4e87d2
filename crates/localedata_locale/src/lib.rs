//! # localedata_locale
//!
//! Locale identities for the localedata engine.
//!
//! This crate provides:
//! - [`LocaleSpec`], a locale broken into language, script, region and variant
//! - [`sublocales`], the ordered specificity hierarchy searched when loading data
//! - Detection of the process default locale
//!
//! ## Example
//!
//! ```rust
//! use localedata_locale::{LocaleSpec, sublocales};
//!
//! let locale: LocaleSpec = "zh-Hans-CN".parse().unwrap();
//! let chain: Vec<String> = sublocales(&locale).iter().map(|l| l.spec()).collect();
//! assert_eq!(chain, ["root", "zh", "und-CN", "zh-Hans", "zh-CN", "zh-Hans-CN"]);
//! ```

mod env;
mod error;
mod spec;
mod sublocales;

pub use env::{DEFAULT_LOCALE, current_locale, normalize_locale_tag};
pub use error::LocaleError;
pub use spec::{LocaleSpec, ROOT_SPEC, UNDEFINED_LANGUAGE};
pub use sublocales::sublocales;
