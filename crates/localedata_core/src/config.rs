//! Locale data configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::LocaleDataError;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use std::sync::OnceLock;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration of one consumer of locale data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDataConfig {
    /// Identity of the consumer. Instances with the same name share a cache.
    pub name: String,

    /// The consumer's own data root. Every global root outranks it.
    pub path: PathBuf,

    /// Load synchronously by default.
    ///
    /// Only takes effect when the loader supports synchronous operation.
    #[serde(default)]
    pub sync: bool,

    /// Whether to read and write the locale data caches.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,

    /// Global roots registered when an instance is built.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<PathBuf>,

    /// Locale used when a load names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

fn default_use_cache() -> bool {
    true
}

impl LocaleDataConfig {
    /// Creates a configuration with default settings.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            sync: false,
            use_cache: default_use_cache(),
            roots: Vec::new(),
            locale: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Comments and trailing commas are allowed. Relative paths are resolved
    /// against the directory containing the file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LocaleDataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.path = parent.join(&config.path);
            config.roots = config.roots.iter().map(|root| parent.join(root)).collect();
        }

        Ok(config)
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LocaleDataError> {
        // Parse into Value first for validation
        let value: serde_json::Value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LocaleDataError::config(format!("Invalid JSON: {}", e)))?
            .ok_or_else(|| LocaleDataError::config("Empty configuration"))?;

        // Initialize and check schema
        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LocaleDataError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LocaleDataError::config(format!("Invalid config: {}", e)))
    }
}
