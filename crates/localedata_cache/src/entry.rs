//! Cache entry types.

use std::sync::Arc;

use serde_json::Value;

/// A value stored in a [`DataCache`](crate::DataCache).
///
/// A key with no entry at all has never been looked up. A key holding
/// [`CacheEntry::Absent`] was looked up and is known to have no data.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Confirmed that no data exists.
    Absent,
    /// Loaded data.
    Data(Arc<Value>),
}

impl CacheEntry {
    /// Wraps a value as a data entry.
    pub fn data(value: Value) -> Self {
        Self::Data(Arc::new(value))
    }

    /// Builds an entry from an optional value, `None` meaning absent.
    pub fn from_option(value: Option<Value>) -> Self {
        value.map_or(Self::Absent, Self::data)
    }

    /// Returns true for [`CacheEntry::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrows the cached value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Absent => None,
            Self::Data(value) => Some(value),
        }
    }

    /// Clones the cached value out of the entry.
    pub fn to_value(&self) -> Option<Value> {
        self.value().cloned()
    }
}

impl From<Value> for CacheEntry {
    fn from(value: Value) -> Self {
        Self::data(value)
    }
}
