//! The locale specificity hierarchy.

use crate::LocaleSpec;

/// Returns the locales to search for `locale`, least specific first.
///
/// The order is:
///
/// 1. root
/// 2. language
/// 3. und-region
/// 4. language-script
/// 5. language-region
/// 6. und-region-variant
/// 7. language-script-region
/// 8. language-region-variant
/// 9. language-script-region-variant
///
/// Levels whose components are missing from `locale` are skipped, duplicates
/// keep their first position, and the list always ends with `locale` itself.
pub fn sublocales(locale: &LocaleSpec) -> Vec<LocaleSpec> {
    let language = locale.language();
    let script = locale.script();
    let region = locale.region();
    let variant = locale.variant();

    let levels = [
        Some(LocaleSpec::root()),
        language.map(|l| LocaleSpec::new(Some(l), None, None, None)),
        region.map(|r| LocaleSpec::new(None, None, Some(r), None)),
        language
            .zip(script)
            .map(|(l, s)| LocaleSpec::new(Some(l), Some(s), None, None)),
        language
            .zip(region)
            .map(|(l, r)| LocaleSpec::new(Some(l), None, Some(r), None)),
        region
            .zip(variant)
            .map(|(r, v)| LocaleSpec::new(None, None, Some(r), Some(v))),
        language
            .zip(script)
            .zip(region)
            .map(|((l, s), r)| LocaleSpec::new(Some(l), Some(s), Some(r), None)),
        language
            .zip(region)
            .zip(variant)
            .map(|((l, r), v)| LocaleSpec::new(Some(l), None, Some(r), Some(v))),
        language
            .zip(script)
            .zip(region)
            .zip(variant)
            .map(|(((l, s), r), v)| LocaleSpec::new(Some(l), Some(s), Some(r), Some(v))),
    ];

    let mut chain: Vec<LocaleSpec> = Vec::with_capacity(levels.len());
    for level in levels.into_iter().flatten() {
        if !chain.contains(&level) {
            chain.push(level);
        }
    }

    // language+variant or script-only tags are not covered by any level
    if chain.last() != Some(locale) {
        chain.retain(|level| level != locale);
        chain.push(locale.clone());
    }

    chain
}
