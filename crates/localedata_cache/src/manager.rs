//! Per-consumer locale data cache.

use std::collections::HashMap;

use localedata_locale::LocaleSpec;
use tracing::{debug, info, trace};

use crate::CacheEntry;

/// Caches locale data for one consumer, keyed by (category, locale spec).
#[derive(Debug)]
pub struct DataCache {
    /// Identity of the consumer this cache belongs to.
    identity: String,
    /// In-memory entries.
    entries: HashMap<(String, String), CacheEntry>,
    /// Whether cache is enabled.
    enabled: bool,
}

impl DataCache {
    /// Creates a new empty cache.
    ///
    /// # Arguments
    ///
    /// * `identity` - Name of the consumer (package name, data root, ...)
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Returns the identity this cache was created for.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Disables caching. Lookups miss and stores are dropped until re-enabled.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Enables caching.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn key(category: &str, locale: &LocaleSpec) -> (String, String) {
        (category.to_string(), locale.spec())
    }

    /// Gets the cached entry for a category and locale.
    ///
    /// `None` means the pair was never looked up; [`CacheEntry::Absent`]
    /// means it was looked up and has no data.
    pub fn get(&self, category: &str, locale: &LocaleSpec) -> Option<CacheEntry> {
        if !self.enabled {
            return None;
        }
        trace!(
            "Getting {} data for locale {} from cache '{}'",
            category, locale, self.identity
        );
        self.entries.get(&Self::key(category, locale)).cloned()
    }

    /// Returns true if anything, including confirmed absence, is cached for
    /// the pair.
    pub fn contains(&self, category: &str, locale: &LocaleSpec) -> bool {
        self.get(category, locale).is_some()
    }

    /// Returns true if any category is cached for the locale.
    pub fn contains_locale(&self, locale: &LocaleSpec) -> bool {
        if !self.enabled {
            return false;
        }
        let spec = locale.spec();
        self.entries.keys().any(|(_, cached)| *cached == spec)
    }

    /// Lists the categories cached for the locale, sorted.
    pub fn categories_for(&self, locale: &LocaleSpec) -> Vec<String> {
        let spec = locale.spec();
        let mut categories: Vec<String> = self
            .entries
            .keys()
            .filter(|(_, cached)| *cached == spec)
            .map(|(category, _)| category.clone())
            .collect();
        categories.sort();
        categories
    }

    /// Stores an entry for a category and locale.
    ///
    /// Storing `None` removes the entry. An empty category is ignored.
    pub fn store(&mut self, category: &str, locale: &LocaleSpec, entry: Option<CacheEntry>) {
        if !self.enabled {
            return;
        }
        if category.is_empty() {
            info!("Attempt to store data in cache '{}' with no category", self.identity);
            return;
        }

        trace!(
            "Storing {} data for locale {} in cache '{}'",
            category, locale, self.identity
        );
        let key = Self::key(category, locale);
        match entry {
            Some(entry) => {
                self.entries.insert(key, entry);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    /// Removes the entry for a category and locale.
    pub fn remove(&mut self, category: &str, locale: &LocaleSpec) {
        self.store(category, locale, None);
    }

    /// Returns the number of live entries, absent markers included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all cache entries.
    pub fn clear(&mut self) {
        debug!("Clearing cache '{}'", self.identity);
        self.entries.clear();
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new("default")
    }
}
