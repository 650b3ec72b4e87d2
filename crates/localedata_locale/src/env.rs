//! Process locale detection.

use tracing::debug;

use crate::LocaleSpec;

/// Locale assumed when the environment does not name a usable one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Environment variables consulted for the process locale, in priority order.
const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Normalizes a raw locale string into hyphenated tag form.
///
/// Encoding suffixes (`.UTF-8`) and modifiers (`@euro`) are stripped and
/// underscores become hyphens. Returns `None` when nothing is left.
///
/// ```rust
/// use localedata_locale::normalize_locale_tag;
///
/// assert_eq!(normalize_locale_tag("en_US.UTF-8"), Some("en-US".to_string()));
/// assert_eq!(normalize_locale_tag("  "), None);
/// ```
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let stripped = raw.trim().split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.replace('_', "-"))
}

/// Returns the locale of the current process.
///
/// `LC_ALL`, `LC_MESSAGES` and `LANG` are consulted in that order. The POSIX
/// `C` locale and unparseable values are skipped. Falls back to
/// [`DEFAULT_LOCALE`].
pub fn current_locale() -> LocaleSpec {
    locale_from_vars(|name| std::env::var(name).ok())
}

fn locale_from_vars(lookup: impl Fn(&str) -> Option<String>) -> LocaleSpec {
    for name in LOCALE_VARIABLES {
        let Some(raw) = lookup(name) else {
            continue;
        };
        let Some(tag) = normalize_locale_tag(&raw) else {
            continue;
        };
        if tag == "C" || tag == "POSIX" {
            continue;
        }
        match LocaleSpec::parse(&tag) {
            Ok(locale) if !locale.is_root() => return locale,
            Ok(_) => {}
            Err(e) => debug!("Ignoring {} value '{}': {}", name, raw, e),
        }
    }

    LocaleSpec::parse(DEFAULT_LOCALE).unwrap_or_default()
}
