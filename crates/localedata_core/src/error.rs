//! Locale data error types.

use localedata_locale::LocaleError;
use thiserror::Error;

/// Errors that can occur while resolving locale data.
///
/// Missing files and unreadable candidates are not errors: they contribute
/// nothing to the result.
#[derive(Debug, Error)]
pub enum LocaleDataError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Synchronous load requested from a loader without synchronous support,
    /// and the data was not cached.
    #[error(
        "Synchronous load of {category} for {locale} requested, but loader '{loader}' \
         does not support synchronous operation and the data is not cached"
    )]
    LoaderUnavailable {
        /// Name of the loader.
        loader: String,
        /// Requested category.
        category: String,
        /// Requested locale.
        locale: String,
    },

    /// The requested locale could not be parsed.
    #[error("Invalid locale: {0}")]
    InvalidLocale(#[from] LocaleError),

    /// Load options that cannot be combined.
    #[error("Invalid load options: {0}")]
    InvalidOptions(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocaleDataError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    /// Creates a loader unavailable error.
    pub fn loader_unavailable(
        loader: impl Into<String>,
        category: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self::LoaderUnavailable {
            loader: loader.into(),
            category: category.into(),
            locale: locale.into(),
        }
    }
}
