//! Per-root manifests of locale data files.
//!
//! A data root may carry an `ilibmanifest.json` listing every data file
//! under it. When present, the manifest replaces searching: a file it does not
//! list is known not to exist.

use std::collections::HashSet;
use std::sync::OnceLock;

use jsonschema::Validator;
use localedata_locale::{LocaleSpec, UNDEFINED_LANGUAGE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// File name of a root's manifest.
pub const MANIFEST_FILE: &str = "ilibmanifest.json";

/// Error type for manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to parse manifest JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Manifest validation failed: {0}")]
    ValidationError(String),
}

/// The structure of `ilibmanifest.json`.
/// This matches `schemas/v1/manifest.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootManifest {
    files: Vec<String>,
    #[serde(skip)]
    index: HashSet<String>,
}

/// A manifest path, classified by the naming convention of data roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    /// `<language>/[<script>/][<region>/][<variant>/]<category>.<ext>`, or
    /// `<category>.<ext>` at the top level for the root locale.
    Split {
        locale: LocaleSpec,
        category: String,
        extension: String,
    },
    /// `<locale-tag>.<ext>` at the top level, holding every category of
    /// several sublocales.
    WholeLocale { locale: LocaleSpec, extension: String },
}

impl ManifestEntry {
    /// Classifies a path relative to a data root.
    ///
    /// A top-level file is a whole-locale file when its name is `root` or
    /// starts with a 2-3 letter language subtag (or `und`) and parses as a
    /// locale; any other top-level file is a root-locale category. Returns
    /// `None` for paths that fit neither layout.
    pub fn classify(relative: &str) -> Option<Self> {
        let relative = normalize_path(relative);
        let (dirs, file) = match relative.rsplit_once('/') {
            Some((dirs, file)) => (Some(dirs), file),
            None => (None, relative.as_str()),
        };
        if file == MANIFEST_FILE {
            return None;
        }
        let (stem, extension) = file.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        let extension = extension.to_string();

        let Some(dirs) = dirs else {
            if let Some(locale) = whole_locale_name(stem) {
                return Some(Self::WholeLocale { locale, extension });
            }
            return Some(Self::Split {
                locale: LocaleSpec::root(),
                category: stem.to_string(),
                extension,
            });
        };

        if dirs.split('/').any(str::is_empty) {
            return None;
        }
        let locale = LocaleSpec::parse(&dirs.replace('/', "-")).ok()?;
        if locale.is_root() {
            return None;
        }
        Some(Self::Split {
            locale,
            category: stem.to_string(),
            extension,
        })
    }

    /// The locale the entry holds data for.
    pub fn locale(&self) -> &LocaleSpec {
        match self {
            Self::Split { locale, .. } | Self::WholeLocale { locale, .. } => locale,
        }
    }
}

fn whole_locale_name(stem: &str) -> Option<LocaleSpec> {
    if stem.eq_ignore_ascii_case("root") {
        return Some(LocaleSpec::root());
    }
    let first = stem.split(['-', '_']).next()?;
    let is_language = (2..=3).contains(&first.len()) && first.chars().all(|c| c.is_ascii_alphabetic());
    if !is_language && first != UNDEFINED_LANGUAGE {
        return None;
    }
    LocaleSpec::parse(stem).ok()
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}

// Embed the schema
// Path is relative to this file: ../../../schemas/v1/manifest.json
const MANIFEST_SCHEMA_JSON: &str = include_str!("../../../schemas/v1/manifest.json");

static SCHEMA: OnceLock<Validator> = OnceLock::new();

impl RootManifest {
    /// Builds a manifest from a list of relative paths.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files: Vec<String> = files.into_iter().map(|f| normalize_path(f.as_ref())).collect();
        let index = files.iter().cloned().collect();
        Self { files, index }
    }

    /// Parses and validates manifest JSON.
    pub fn parse(json_str: &str) -> Result<Self, ManifestError> {
        // 1. Parse JSON to Value
        let instance: Value = serde_json::from_str(json_str)?;

        // 2. Validate against Schema
        let schema = SCHEMA.get_or_init(|| {
            let schema_json: Value =
                serde_json::from_str(MANIFEST_SCHEMA_JSON).expect("Invalid embedded schema");
            Validator::new(&schema_json).expect("Invalid schema compilation")
        });

        if let Err(e) = schema.validate(&instance) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(ManifestError::ValidationError(error_msg));
        }

        // 3. Deserialize and index
        let manifest: RootManifest = serde_json::from_value(instance)?;
        Ok(Self::new(manifest.files))
    }

    /// The listed paths, as written in the manifest.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Returns true if `relative` is listed.
    pub fn contains(&self, relative: &str) -> bool {
        self.index.contains(&normalize_path(relative))
    }

    /// Returns true if the manifest lists no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All listed paths that follow the data root layout.
    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.files
            .iter()
            .filter_map(|file| ManifestEntry::classify(file))
            .collect()
    }

    /// Listed entries holding data for exactly `locale`.
    pub fn entries_for(&self, locale: &LocaleSpec) -> Vec<ManifestEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.locale() == locale)
            .collect()
    }

    /// Categories with a split file for any of `locales`, sorted.
    pub fn categories_for(&self, locales: &[LocaleSpec]) -> Vec<String> {
        let mut categories: Vec<String> = self
            .entries()
            .into_iter()
            .filter_map(|entry| match entry {
                ManifestEntry::Split { locale, category, .. } if locales.contains(&locale) => {
                    Some(category)
                }
                _ => None,
            })
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

impl PartialEq for RootManifest {
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files
    }
}
