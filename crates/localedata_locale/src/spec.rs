//! Structured locale specifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{LocaleError, normalize_locale_tag};

/// Canonical spelling of the world-wide default locale.
pub const ROOT_SPEC: &str = "root";

/// Language subtag used when a locale has no language of its own.
pub const UNDEFINED_LANGUAGE: &str = "und";

/// The UN M.49 code for "World". A locale made of only this region is root.
const WORLD_REGION: &str = "001";

/// A locale broken into its four components.
///
/// Any component may be absent. The specifier with every component absent
/// is the root locale, which carries the defaults for the whole world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleSpec {
    language: Option<String>,
    script: Option<String>,
    region: Option<String>,
    variant: Option<String>,
}

impl LocaleSpec {
    /// Creates a specifier from its components.
    ///
    /// Empty components and the `und` language are treated as absent.
    pub fn new(
        language: Option<&str>,
        script: Option<&str>,
        region: Option<&str>,
        variant: Option<&str>,
    ) -> Self {
        let present = |part: Option<&str>| {
            part.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            language: present(language).filter(|lang| lang != UNDEFINED_LANGUAGE),
            script: present(script),
            region: present(region),
            variant: present(variant),
        }
    }

    /// The root locale.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a locale tag such as `en-US`, `zh_Hans_CN.UTF-8`, `und-CH` or `root`.
    ///
    /// A tag made of a bare region (`US`, `419`) is read as `und-<region>`.
    /// Only the first variant of a tag is kept.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ROOT_SPEC) {
            return Ok(Self::root());
        }

        let normalized = normalize_locale_tag(trimmed)
            .ok_or_else(|| LocaleError::invalid_tag(tag, "no language subtags"))?;
        let candidate = qualify_bare_region(&normalized);

        let langid = LanguageIdentifier::from_str(&candidate)
            .map_err(|e| LocaleError::invalid_tag(tag, e.to_string()))?;

        let script = langid.script.map(|script| script.as_str().to_string());
        let region = langid.region.map(|region| region.as_str().to_string());
        let variant = langid.variants().next().map(|variant| variant.as_str().to_string());
        let spec = Self::new(
            Some(langid.language.as_str()),
            script.as_deref(),
            region.as_deref(),
            variant.as_deref(),
        );

        if spec.language.is_none()
            && spec.script.is_none()
            && spec.variant.is_none()
            && spec.region.as_deref() == Some(WORLD_REGION)
        {
            return Ok(Self::root());
        }

        Ok(spec)
    }

    /// Returns the language subtag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns the script subtag, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Returns the region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the variant subtag, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns true for the world-wide default locale.
    pub fn is_root(&self) -> bool {
        self.specificity() == 0
    }

    /// Number of components present, from 0 (root) to 4.
    pub fn specificity(&self) -> usize {
        [&self.language, &self.script, &self.region, &self.variant]
            .iter()
            .filter(|part| part.is_some())
            .count()
    }

    /// Returns true when every component present in `self` is present in
    /// `other` with the same value.
    pub fn generalizes(&self, other: &LocaleSpec) -> bool {
        let covers = |mine: &Option<String>, theirs: &Option<String>| {
            mine.is_none() || mine == theirs
        };

        covers(&self.language, &other.language)
            && covers(&self.script, &other.script)
            && covers(&self.region, &other.region)
            && covers(&self.variant, &other.variant)
    }

    /// Directory segments under a data root for files split by locale part.
    ///
    /// Root has no segments. A locale without a language starts with `und`.
    pub fn path_segments(&self) -> Vec<&str> {
        if self.is_root() {
            return Vec::new();
        }

        let mut segments = vec![self.language.as_deref().unwrap_or(UNDEFINED_LANGUAGE)];
        segments.extend(self.script.as_deref());
        segments.extend(self.region.as_deref());
        segments.extend(self.variant.as_deref());
        segments
    }

    /// Canonical string form, e.g. `root`, `en`, `und-US`, `zh-Hans-CN`.
    pub fn spec(&self) -> String {
        if self.is_root() {
            ROOT_SPEC.to_string()
        } else {
            self.path_segments().join("-")
        }
    }
}

/// Prefixes `und-` to tags whose first subtag is a region (`US`, `419`).
fn qualify_bare_region(tag: &str) -> String {
    let first = tag.split('-').next().unwrap_or_default();
    let is_alpha_region = first.len() == 2 && first.chars().all(|c| c.is_ascii_uppercase());
    let is_numeric_region = first.len() == 3 && first.chars().all(|c| c.is_ascii_digit());

    if is_alpha_region || is_numeric_region {
        format!("{UNDEFINED_LANGUAGE}-{tag}")
    } else {
        tag.to_string()
    }
}

impl fmt::Display for LocaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}

impl FromStr for LocaleSpec {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleSpec {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for LocaleSpec {
    type Error = LocaleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LocaleSpec> for String {
    fn from(value: LocaleSpec) -> Self {
        value.spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::root("root", "root")]
    #[case::empty("", "root")]
    #[case::language("en", "en")]
    #[case::language_region("en-US", "en-US")]
    #[case::underscores("en_US", "en-US")]
    #[case::posix_suffix("de_DE.UTF-8", "de-DE")]
    #[case::modifier("sr_RS@latin", "sr-RS")]
    #[case::script("zh-Hans-CN", "zh-Hans-CN")]
    #[case::case_folding("zh-hans-cn", "zh-Hans-CN")]
    #[case::undefined_language("und-CH", "und-CH")]
    #[case::bare_region("US", "und-US")]
    #[case::numeric_region("419", "und-419")]
    #[case::world("und-001", "root")]
    #[case::variant("en-US-posix", "en-US-posix")]
    fn test_parse_canonical_spec(#[case] tag: &str, #[case] expected: &str) {
        let locale = LocaleSpec::parse(tag).unwrap();
        assert_eq!(locale.spec(), expected);
    }

    #[test]
    fn test_parse_components() {
        let locale = LocaleSpec::parse("sr-Latn-RS-valencia").unwrap();
        assert_eq!(locale.language(), Some("sr"));
        assert_eq!(locale.script(), Some("Latn"));
        assert_eq!(locale.region(), Some("RS"));
        assert_eq!(locale.variant(), Some("valencia"));
        assert_eq!(locale.specificity(), 4);
    }

    #[test]
    fn test_parse_invalid_tag() {
        let err = LocaleSpec::parse("not a locale!").unwrap_err();
        assert!(matches!(err, LocaleError::InvalidTag { .. }));
    }

    #[test]
    fn test_root_has_no_segments() {
        let root = LocaleSpec::root();
        assert!(root.is_root());
        assert!(root.path_segments().is_empty());
        assert_eq!(root.to_string(), "root");
    }

    #[test]
    fn test_path_segments_use_und_without_language() {
        let locale = LocaleSpec::new(None, None, Some("US"), Some("posix"));
        assert_eq!(locale.path_segments(), vec!["und", "US", "posix"]);
    }

    #[test]
    fn test_new_treats_und_as_absent() {
        let locale = LocaleSpec::new(Some("und"), None, Some("JP"), None);
        assert_eq!(locale.language(), None);
        assert_eq!(locale.spec(), "und-JP");
    }

    #[test]
    fn test_generalizes() {
        let full = LocaleSpec::parse("en-Latn-US").unwrap();
        assert!(LocaleSpec::root().generalizes(&full));
        assert!(LocaleSpec::parse("en").unwrap().generalizes(&full));
        assert!(LocaleSpec::parse("und-US").unwrap().generalizes(&full));
        assert!(!LocaleSpec::parse("en-GB").unwrap().generalizes(&full));
        assert!(!full.generalizes(&LocaleSpec::parse("en").unwrap()));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let locale = LocaleSpec::parse("fr_CA").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"fr-CA\"");

        let back: LocaleSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
    }
}
