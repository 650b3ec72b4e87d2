//! Merging and pruning of layered locale data.
//!
//! Locale data is layered from the root locale down to the requested one.
//! Each layer only needs to carry what differs from the layers above it:
//! [`merge`] overlays a layer onto its inherited view, and [`prune`] strips a
//! layer down to the fields its inherited view does not already have.
//!
//! For any parent view `p` and layer `c`, with the default options:
//!
//! ```rust
//! use localedata_core::merge::{merge, prune, MergeOptions};
//! use serde_json::json;
//!
//! let p = json!({"a": "b", "n": {"x": 1, "y": 2}});
//! let c = json!({"a": "b", "n": {"x": 1, "y": 3}, "z": true});
//! let options = MergeOptions::default();
//!
//! let pruned = prune(&p, &c);
//! assert_eq!(pruned, json!({"n": {"y": 3}, "z": true}));
//! assert_eq!(merge(&p, &pruned, options), merge(&p, &c, options));
//! ```

use std::collections::BTreeMap;

use localedata_locale::{LocaleSpec, sublocales};
use serde_json::{Map, Value};

/// Options for [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Append child arrays to parent arrays instead of replacing them.
    pub concat_arrays: bool,
}

/// Overlays `child` onto `parent`.
///
/// Keys present in both where both values are objects are merged
/// recursively; otherwise the child's value wins. Neither input is modified.
pub fn merge(parent: &Value, child: &Value, options: MergeOptions) -> Value {
    match (parent, child) {
        (Value::Object(parent), Value::Object(child)) => {
            let mut merged = parent.clone();
            for (key, value) in child {
                let combined = match merged.get(key) {
                    Some(existing) => merge(existing, value, options),
                    None => value.clone(),
                };
                merged.insert(key.clone(), combined);
            }
            Value::Object(merged)
        }
        (Value::Array(parent), Value::Array(child)) if options.concat_arrays => {
            Value::Array(parent.iter().chain(child).cloned().collect())
        }
        _ => child.clone(),
    }
}

/// Removes from `child` every field already present with the same value in
/// `parent_merged`.
///
/// Nested objects are pruned recursively. A nested object that differs from
/// the parent's but has nothing left after pruning is kept as `{}`.
pub fn prune(parent_merged: &Value, child: &Value) -> Value {
    let (Value::Object(parent), Value::Object(child)) = (parent_merged, child) else {
        return child.clone();
    };

    let mut pruned = Map::new();
    for (key, value) in child {
        match parent.get(key) {
            None => {
                pruned.insert(key.clone(), value.clone());
            }
            Some(inherited) if inherited == value => {}
            Some(inherited) if inherited.is_object() && value.is_object() => {
                pruned.insert(key.clone(), prune(inherited, value));
            }
            Some(_) => {
                pruned.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(pruned)
}

/// Merges every present layer, least specific first. Returns `None` when no
/// layer is present.
pub fn merge_all<'a, I>(layers: I, options: MergeOptions) -> Option<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    layers.into_iter().fold(None, |merged, layer| match merged {
        None => Some(layer.clone()),
        Some(merged) => Some(merge(&merged, layer, options)),
    })
}

/// The views of one level of a locale chain.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelView {
    /// The level's own data, if it has any.
    pub data: Option<Value>,
    /// The level's data overlaid on everything above it.
    pub merged: Value,
    /// The level's data minus what it inherits.
    pub pruned: Option<Value>,
}

/// Computes the merged and pruned view of every level of a chain ordered
/// from least to most specific.
///
/// A level without data inherits the merged view above it unchanged. The
/// first level's merged and pruned views are its own data.
pub fn cascade(levels: &[Option<Value>], options: MergeOptions) -> Vec<LevelView> {
    let mut views: Vec<LevelView> = Vec::with_capacity(levels.len());
    let mut inherited: Option<Value> = None;

    for data in levels {
        let (merged, pruned) = match (&inherited, data) {
            (None, Some(data)) => (data.clone(), Some(data.clone())),
            (Some(parent), Some(data)) => (merge(parent, data, options), Some(prune(parent, data))),
            (Some(parent), None) => (parent.clone(), None),
            (None, None) => (Value::Object(Map::new()), None),
        };

        if data.is_some() || inherited.is_some() {
            inherited = Some(merged.clone());
        }
        views.push(LevelView {
            data: data.clone(),
            merged,
            pruned,
        });
    }

    views
}

/// Merged and pruned data of one locale within a locale map.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleViews {
    /// Data inherited along the locale's chain, with its own data on top.
    pub merged: Value,
    /// The locale's own data minus what it inherits.
    pub pruned: Value,
}

/// Computes merged and pruned views for every locale of a locale map.
///
/// Each locale is layered on the entries of the map that lie on its own
/// sublocale chain; ancestors missing from the map are skipped. Pruned
/// views are what a data set needs to ship when consumers cascade.
pub fn merge_and_prune_locales(
    locales: &BTreeMap<LocaleSpec, Value>,
    options: MergeOptions,
) -> BTreeMap<LocaleSpec, LocaleViews> {
    locales
        .keys()
        .filter_map(|locale| {
            let levels: Vec<Option<Value>> = sublocales(locale)
                .iter()
                .map(|level| locales.get(level).cloned())
                .collect();
            let view = cascade(&levels, options).pop()?;
            let pruned = view.pruned?;
            Some((
                locale.clone(),
                LocaleViews {
                    merged: view.merged,
                    pruned,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    const REPLACE: MergeOptions = MergeOptions { concat_arrays: false };
    const CONCAT: MergeOptions = MergeOptions { concat_arrays: true };

    #[rstest]
    #[case::child_wins(json!({"a": 1}), json!({"a": 2}), json!({"a": 2}))]
    #[case::union(json!({"a": 1}), json!({"b": 2}), json!({"a": 1, "b": 2}))]
    #[case::nested(
        json!({"n": {"x": 1, "y": 2}}),
        json!({"n": {"y": 3}}),
        json!({"n": {"x": 1, "y": 3}})
    )]
    #[case::object_replaces_scalar(json!({"n": 1}), json!({"n": {"x": 1}}), json!({"n": {"x": 1}}))]
    #[case::scalar_replaces_object(json!({"n": {"x": 1}}), json!({"n": "s"}), json!({"n": "s"}))]
    #[case::arrays_replace(json!({"l": [1, 2]}), json!({"l": [3]}), json!({"l": [3]}))]
    #[case::empty_child(json!({"a": 1}), json!({}), json!({"a": 1}))]
    #[case::null_wins(json!({"a": 1}), json!({"a": null}), json!({"a": null}))]
    fn test_merge(#[case] parent: Value, #[case] child: Value, #[case] expected: Value) {
        assert_eq!(merge(&parent, &child, REPLACE), expected);
    }

    #[test]
    fn test_merge_concat_arrays() {
        let merged = merge(
            &json!({"l": [1, 2], "n": {"m": ["a"]}}),
            &json!({"l": [3], "n": {"m": ["b"]}}),
            CONCAT,
        );
        assert_eq!(merged, json!({"l": [1, 2, 3], "n": {"m": ["a", "b"]}}));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let parent = json!({"n": {"x": 1}});
        let child = json!({"n": {"y": 2}});
        let _ = merge(&parent, &child, REPLACE);
        assert_eq!(parent, json!({"n": {"x": 1}}));
        assert_eq!(child, json!({"n": {"y": 2}}));
    }

    #[rstest]
    #[case::identical(json!({"a": 1}), json!({"a": 1}), json!({}))]
    #[case::child_only(json!({"a": 1}), json!({"b": 2}), json!({"b": 2}))]
    #[case::differs(json!({"a": 1}), json!({"a": 2}), json!({"a": 2}))]
    #[case::nested_partial(
        json!({"n": {"x": 1, "y": 2}}),
        json!({"n": {"x": 1, "y": 3}}),
        json!({"n": {"y": 3}})
    )]
    #[case::nested_identical_removed(json!({"n": {"x": 1}}), json!({"n": {"x": 1}}), json!({}))]
    #[case::nested_subset_kept_empty(
        json!({"n": {"x": 1, "y": 2}}),
        json!({"n": {"x": 1}}),
        json!({"n": {}})
    )]
    #[case::array_differs(json!({"l": [1]}), json!({"l": [1, 2]}), json!({"l": [1, 2]}))]
    #[case::null_differs(json!({"a": 1}), json!({"a": null}), json!({"a": null}))]
    fn test_prune(#[case] parent: Value, #[case] child: Value, #[case] expected: Value) {
        assert_eq!(prune(&parent, &child), expected);
    }

    #[test]
    fn test_cascade_example_chain() {
        let levels = vec![
            Some(json!({"a": "b", "c": "d"})),
            Some(json!({"a": "b en"})),
            None,
            Some(json!({"c": "d en-US", "a": "b en"})),
        ];
        let views = cascade(&levels, REPLACE);

        assert_eq!(views[0].merged, json!({"a": "b", "c": "d"}));
        assert_eq!(views[0].pruned, Some(json!({"a": "b", "c": "d"})));
        assert_eq!(views[1].merged, json!({"a": "b en", "c": "d"}));
        assert_eq!(views[2].merged, views[1].merged);
        assert_eq!(views[2].pruned, None);
        assert_eq!(views[3].merged, json!({"a": "b en", "c": "d en-US"}));
        assert_eq!(views[3].pruned, Some(json!({"c": "d en-US"})));
    }

    #[test]
    fn test_cascade_without_root_data() {
        let views = cascade(&[None, Some(json!({"a": 1}))], REPLACE);
        assert_eq!(views[0].merged, json!({}));
        assert_eq!(views[1].merged, json!({"a": 1}));
        assert_eq!(views[1].pruned, Some(json!({"a": 1})));
    }

    #[test]
    fn test_merge_all() {
        let layers = [json!({"a": 1, "b": 1}), json!({"b": 2}), json!({"c": 3})];
        assert_eq!(
            merge_all(&layers, REPLACE),
            Some(json!({"a": 1, "b": 2, "c": 3}))
        );
        assert_eq!(merge_all(&Vec::new(), REPLACE), None);
    }

    #[test]
    fn test_merge_and_prune_locales() {
        let locale = |tag: &str| LocaleSpec::parse(tag).unwrap();
        let locales: BTreeMap<LocaleSpec, Value> = [
            (LocaleSpec::root(), json!({"clock": "12", "units": "metric"})),
            (locale("en"), json!({"clock": "12", "units": "metric", "first": 0})),
            // en-US skips und-US, which is absent
            (locale("en-US"), json!({"clock": "12", "units": "imperial", "first": 0})),
            (locale("de"), json!({"clock": "24"})),
        ]
        .into_iter()
        .collect();

        let views = merge_and_prune_locales(&locales, REPLACE);

        assert_eq!(views[&LocaleSpec::root()].pruned, json!({"clock": "12", "units": "metric"}));
        assert_eq!(views[&locale("en")].pruned, json!({"first": 0}));
        assert_eq!(views[&locale("en-US")].pruned, json!({"units": "imperial"}));
        assert_eq!(
            views[&locale("en-US")].merged,
            json!({"clock": "12", "units": "imperial", "first": 0})
        );
        assert_eq!(views[&locale("de")].pruned, json!({"clock": "24"}));
    }

    fn arb_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            (0..4i64).prop_map(Value::from),
            "[ab]".prop_map(Value::from),
            proptest::collection::vec((0..3i64).prop_map(Value::from), 0..3).prop_map(Value::from),
        ]
    }

    fn object_of(values: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
        let keys = proptest::sample::select(vec!["a", "b", "c", "d"]);
        proptest::collection::btree_map(keys, values, 0..4).prop_map(|map| {
            Value::Object(map.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
        })
    }

    fn arb_object() -> impl Strategy<Value = Value> {
        let nested = arb_leaf().prop_recursive(2, 16, 4, |inner| object_of(inner));
        object_of(nested)
    }

    proptest! {
        #[test]
        fn prop_prune_then_merge_round_trips(parent in arb_object(), child in arb_object()) {
            let pruned = prune(&parent, &child);
            prop_assert_eq!(merge(&parent, &pruned, REPLACE), merge(&parent, &child, REPLACE));
        }

        #[test]
        fn prop_merging_empty_is_identity(parent in arb_object()) {
            prop_assert_eq!(merge(&parent, &json!({}), REPLACE), parent);
        }

        #[test]
        fn prop_cascade_matches_fold(levels in proptest::collection::vec(arb_object(), 1..5)) {
            let views = cascade(
                &levels.iter().cloned().map(Some).collect::<Vec<_>>(),
                REPLACE,
            );
            for (i, view) in views.iter().enumerate() {
                prop_assert_eq!(Some(view.merged.clone()), merge_all(&levels[..=i], REPLACE));
                if i > 0 {
                    let pruned = view.pruned.clone().unwrap();
                    prop_assert_eq!(merge(&views[i - 1].merged, &pruned, REPLACE), view.merged.clone());
                }
            }
        }
    }
}
