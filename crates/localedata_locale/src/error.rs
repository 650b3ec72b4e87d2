//! Locale error types.

use thiserror::Error;

/// Errors that can occur while interpreting a locale tag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The tag is not a well-formed language tag.
    #[error("Invalid locale tag '{tag}': {reason}")]
    InvalidTag {
        /// The tag as supplied by the caller.
        tag: String,
        /// Why the tag was rejected.
        reason: String,
    },
}

impl LocaleError {
    /// Creates an invalid tag error.
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}
