//! # localedata_cache
//!
//! Caching layer for localedata.
//!
//! Every consumer of locale data gets its own [`DataCache`] from the
//! [`CacheRegistry`], keyed by (category, locale spec).
//!
//! ## Cache Strategy
//!
//! 1. **Confirmed absence**: a lookup that found nothing is stored as
//!    [`CacheEntry::Absent`] and never fetched again
//! 2. **Singleton per identity**: acquiring the cache for the same identity
//!    twice yields the same instance
//! 3. **Process lifetime**: nothing expires; only an explicit clear empties
//!    a cache
//!
//! There is no on-disk storage.

mod entry;
mod manager;
mod registry;

pub use entry::CacheEntry;
pub use manager::DataCache;
pub use registry::{CacheRegistry, SharedCache};
