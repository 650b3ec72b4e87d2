//! File layout of data roots.
//!
//! Split files hold one category of one locale:
//! `<root>/<language>/[<script>/][<region>/][<variant>/]<category>.<ext>`,
//! with `und` standing in for a missing language and the root locale's
//! files directly under `<root>`. Whole-locale files hold every category of
//! several sublocales: `<root>/<locale-tag>.<ext>`.

use std::path::{Path, PathBuf};

use localedata_locale::LocaleSpec;

/// Path of a split file relative to its root, with `/` separators.
pub fn split_relative(locale: &LocaleSpec, category: &str, extension: &str) -> String {
    let file = format!("{category}.{extension}");
    let mut parts = locale.path_segments();
    parts.push(file.as_str());
    parts.join("/")
}

/// Full path of a split file.
pub fn split_path(root: &Path, locale: &LocaleSpec, category: &str, extension: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(locale.path_segments());
    path.push(format!("{category}.{extension}"));
    path
}

/// Path of a whole-locale file relative to its root.
pub fn whole_locale_relative(locale: &LocaleSpec, extension: &str) -> String {
    format!("{}.{extension}", locale.spec())
}

/// Full path of a whole-locale file.
pub fn whole_locale_path(root: &Path, locale: &LocaleSpec, extension: &str) -> PathBuf {
    root.join(whole_locale_relative(locale, extension))
}
