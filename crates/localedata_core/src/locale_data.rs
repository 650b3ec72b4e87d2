//! The locale data resolution engine.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::join_all;
use localedata_cache::{CacheEntry, SharedCache};
use localedata_loader::{DecoderRegistry, Loader};
use localedata_locale::{LocaleSpec, current_locale, sublocales};
use localedata_manifest::{MANIFEST_FILE, RootManifest};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::merge::{MergeOptions, merge_all};
use crate::paths::{split_path, split_relative, whole_locale_path, whole_locale_relative};
use crate::{LocaleDataConfig, LocaleDataContext, LocaleDataError};

/// How the levels of a locale chain are reduced to one result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Merge every level that has data, most specific on top.
    #[default]
    Cascade,
    /// Return the data of the most specific level that has any, unmerged.
    ///
    /// Within that level the highest-precedence root holding data wins, the
    /// same root a cascade takes the level from.
    MostSpecific,
    /// Return the data of the least specific level that has any, unmerged.
    FirstFound,
}

/// Parameters of one load.
///
/// ```rust
/// use localedata_core::{LoadMode, LoadParams};
///
/// let params = LoadParams::new("info").locale("en-US").most_specific();
/// assert_eq!(params.load_mode(), LoadMode::MostSpecific);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadParams {
    category: String,
    locale: Option<String>,
    mode: LoadMode,
    cross_roots: bool,
    concat_arrays: bool,
    sync: Option<bool>,
}

impl LoadParams {
    /// Loads `category` for the default locale.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    /// Sets the locale to load for.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the reduction mode.
    pub fn mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for [`LoadMode::MostSpecific`].
    pub fn most_specific(self) -> Self {
        self.mode(LoadMode::MostSpecific)
    }

    /// Shorthand for [`LoadMode::FirstFound`].
    pub fn first_found(self) -> Self {
        self.mode(LoadMode::FirstFound)
    }

    /// Merges each level across all roots before moving to the next level.
    ///
    /// Specificity then dominates and root precedence only breaks ties
    /// within a level. Only valid with [`LoadMode::Cascade`].
    pub fn cross_roots(mut self, cross_roots: bool) -> Self {
        self.cross_roots = cross_roots;
        self
    }

    /// Appends arrays of more specific levels instead of replacing them.
    pub fn concat_arrays(mut self, concat_arrays: bool) -> Self {
        self.concat_arrays = concat_arrays;
        self
    }

    /// Overrides the instance's execution mode for this load.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = Some(sync);
        self
    }

    /// The category to load.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The reduction mode.
    pub fn load_mode(&self) -> LoadMode {
        self.mode
    }

    /// Key of the resolved result in the consumer's cache.
    fn cache_key(&self) -> String {
        let mut key = self.category.clone();
        match self.mode {
            LoadMode::Cascade => {}
            LoadMode::MostSpecific => key.push_str("?most-specific"),
            LoadMode::FirstFound => key.push_str("?first-found"),
        }
        if self.cross_roots {
            key.push_str("?cross-roots");
        }
        if self.concat_arrays {
            key.push_str("?concat-arrays");
        }
        key
    }
}

/// A load with its locale chain resolved.
struct Request {
    category: String,
    locale: LocaleSpec,
    chain: Vec<LocaleSpec>,
    mode: LoadMode,
    cross_roots: bool,
    options: MergeOptions,
    cache_key: String,
}

/// What is known about one (level, root) pair before fetching.
enum Slot {
    /// Cached, or ruled out by the root's manifest.
    Known(Option<Arc<Value>>),
    /// Candidate files, in extension order.
    Fetch(Vec<PathBuf>),
}

/// Slots of every level (outer, least specific first) and root (inner, in
/// precedence order).
struct Plan {
    /// Context generation the root list was read at.
    generation: u64,
    roots: Vec<PathBuf>,
    slots: Vec<Vec<Slot>>,
}

impl Plan {
    fn fetch_list(&self) -> Vec<Option<PathBuf>> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|slot| match slot {
                Slot::Fetch(paths) => Some(paths),
                Slot::Known(_) => None,
            })
            .flatten()
            .cloned()
            .map(Some)
            .collect()
    }
}

/// Locates, loads, merges and caches locale data for one consumer.
///
/// Data is searched in every global root of the context, highest
/// precedence first, then in the consumer's own root. Within a root, the
/// locale chain from [`sublocales`] is searched from `root` down to the
/// requested locale.
///
/// Fragments found in each root are cached per root and shared with every
/// consumer; resolved results are cached per consumer. A lookup that found
/// nothing is cached too and never repeated until the cache is cleared.
pub struct LocaleData {
    name: String,
    path: PathBuf,
    cache_identity: String,
    sync: bool,
    use_cache: bool,
    locale: Option<LocaleSpec>,
    loader: Arc<dyn Loader>,
    decoders: Arc<DecoderRegistry>,
    context: Arc<LocaleDataContext>,
    seen_generation: AtomicU64,
}

impl LocaleData {
    /// Creates an instance on the process-wide context.
    pub fn new(config: LocaleDataConfig, loader: Arc<dyn Loader>) -> Result<Self, LocaleDataError> {
        Self::with_context(config, loader, LocaleDataContext::global())
    }

    /// Creates an instance on the given context.
    ///
    /// Roots listed in the configuration are added to the context's global
    /// roots. Fails when the name or the path is missing, or the default
    /// locale does not parse.
    pub fn with_context(
        config: LocaleDataConfig,
        loader: Arc<dyn Loader>,
        context: Arc<LocaleDataContext>,
    ) -> Result<Self, LocaleDataError> {
        if config.name.trim().is_empty() {
            return Err(LocaleDataError::config("LocaleData requires a name"));
        }
        if config.path.as_os_str().is_empty() {
            return Err(LocaleDataError::config(format!(
                "LocaleData '{}' requires a path to its locale data",
                config.name
            )));
        }

        let locale = config
            .locale
            .as_deref()
            .map(LocaleSpec::parse)
            .transpose()
            .map_err(|e| LocaleDataError::config(format!("Invalid default locale: {}", e)))?;

        for root in &config.roots {
            context.roots().add(root);
        }

        if config.sync && !loader.supports_sync() {
            debug!(
                "Loader '{}' cannot load synchronously; '{}' loads asynchronously",
                loader.name(),
                config.name
            );
        }

        Ok(Self {
            sync: config.sync && loader.supports_sync(),
            use_cache: config.use_cache,
            seen_generation: AtomicU64::new(context.generation()),
            cache_identity: format!("{}@{}", config.name, config.path.display()),
            name: config.name,
            path: config.path,
            locale,
            loader,
            decoders: Arc::new(DecoderRegistry::default()),
            context,
        })
    }

    /// Replaces the decoders, and with them the file extensions tried.
    pub fn with_decoders(mut self, decoders: DecoderRegistry) -> Self {
        self.decoders = Arc::new(decoders);
        self
    }

    /// The consumer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The consumer's own data root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if loads are synchronous by default.
    pub fn is_sync(&self) -> bool {
        self.sync
    }

    /// The roots searched, highest precedence first. Read at call time, so
    /// roots added after construction are included.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.context.roots().roots_with(&self.path)
    }

    /// The context this instance is built on.
    pub fn context(&self) -> &Arc<LocaleDataContext> {
        &self.context
    }

    /// Loads data, blocking the caller.
    ///
    /// Fails with [`LocaleDataError::LoaderUnavailable`] when files would
    /// have to be read and the loader cannot read synchronously.
    pub fn load_data_sync(&self, params: LoadParams) -> Result<Option<Value>, LocaleDataError> {
        let request = self.request(&params)?;
        if let Some(hit) = self.cached_result(&request) {
            return Ok(hit);
        }

        self.load_manifests_sync(&self.roots());

        let plan = self.plan(&request);
        let paths = plan.fetch_list();
        let contents = if paths.is_empty() {
            Vec::new()
        } else {
            let unavailable = || {
                LocaleDataError::loader_unavailable(
                    self.loader.name(),
                    &request.category,
                    request.locale.spec(),
                )
            };
            if !self.loader.supports_sync() {
                return Err(unavailable());
            }
            self.loader
                .load_files_sync(&paths)
                .map_err(|_| unavailable())?
        };

        Ok(self.finish(&request, plan, contents))
    }

    /// Loads data.
    ///
    /// Runs synchronously when the params or the instance ask for it.
    /// Otherwise whole-locale files of the chain are read first, then all
    /// candidate files are fetched concurrently; results are always merged
    /// in chain order.
    pub async fn load_data(&self, params: LoadParams) -> Result<Option<Value>, LocaleDataError> {
        if params.sync.unwrap_or(self.sync) {
            return self.load_data_sync(params);
        }

        let request = self.request(&params)?;
        if let Some(hit) = self.cached_result(&request) {
            return Ok(hit);
        }

        let roots = self.roots();
        self.load_manifests(&roots).await;
        self.prefetch_locale_files(&request.chain, &roots).await;

        let plan = self.plan(&request);
        let paths = plan.fetch_list();
        let contents = if paths.is_empty() {
            Vec::new()
        } else {
            self.loader.load_files(&paths).await
        };

        Ok(self.finish(&request, plan, contents))
    }

    /// Preloads everything known about `locale` so later loads, including
    /// synchronous ones on an asynchronous-only loader, hit the cache.
    ///
    /// Reads the whole-locale files of every sublocale in every reachable
    /// root, then resolves every category found in them, in the caches or
    /// in the roots' manifests. Returns `Ok(false)` when no root is
    /// reachable; a locale without any data still succeeds.
    pub async fn ensure_locale(&self, locale: &str) -> Result<bool, LocaleDataError> {
        let locale = LocaleSpec::parse(locale)?;
        let roots = self.roots();

        let checks = join_all(roots.iter().map(|root| self.loader.is_reachable(root))).await;
        let reachable: Vec<PathBuf> = roots
            .into_iter()
            .zip(checks)
            .filter_map(|(root, reachable)| {
                if !reachable {
                    debug!("Locale data root {} is not reachable", root.display());
                }
                reachable.then_some(root)
            })
            .collect();
        if reachable.is_empty() {
            warn!("No locale data root is reachable to ensure {}", locale);
            return Ok(false);
        }

        let chain = sublocales(&locale);
        self.load_manifests(&reachable).await;
        let mut categories = self.prefetch_locale_files(&chain, &reachable).await;

        for root in &reachable {
            if self.use_cache {
                let cache = self.context.root_cache(root);
                let cache = cache.lock();
                for level in &chain {
                    categories.extend(cache.categories_for(level));
                }
            }
            if let Some(manifest) = self.context.manifest(root).flatten() {
                categories.extend(manifest.categories_for(&chain));
            }
        }

        info!(
            "Ensuring {} categories of locale {} for '{}'",
            categories.len(),
            locale,
            self.name
        );
        let loads = categories.iter().map(|category| {
            self.load_data(
                LoadParams::new(category.clone())
                    .locale(locale.clone())
                    .sync(false),
            )
        });
        for result in join_all(loads).await {
            result?;
        }

        Ok(true)
    }

    /// Returns true if data for `locale` is known, present or confirmed
    /// absent, without loading anything.
    ///
    /// With a category, checks that category; without one, any category.
    /// Data for the root locale alone does not count.
    pub fn check_cache(&self, locale: &str, category: Option<&str>) -> bool {
        let locale = match LocaleSpec::parse(locale) {
            Ok(locale) => locale,
            Err(e) => {
                debug!("check_cache: {}", e);
                return false;
            }
        };

        if let (Some(category), Some(cache)) = (category, self.package_cache())
            && cache.lock().contains(category, &locale)
        {
            return true;
        }

        let roots = self.roots();
        let extensions = self.decoders.extensions();
        sublocales(&locale).iter().skip(1).any(|level| {
            roots.iter().any(|root| {
                let known = [self.context.root_cache(root), self.miss_cache(root)]
                    .iter()
                    .any(|cache| {
                        let cache = cache.lock();
                        match category {
                            Some(category) => cache.contains(category, level),
                            None => cache.contains_locale(level),
                        }
                    });
                known
                    || extensions.iter().any(|ext| {
                        self.context
                            .fragments()
                            .is_file_loaded(&whole_locale_path(root, level, ext))
                    })
            })
        })
    }

    /// Caches data the application already holds, as if it had been read
    /// from `root`.
    ///
    /// `data` maps locale tags to objects mapping categories to data, the
    /// layout of whole-locale files.
    pub fn cache_data(&self, data: &Value, root: impl AsRef<Path>) {
        if !self.use_cache {
            debug!("'{}' does not use the cache; ignoring cached data", self.name);
            return;
        }
        self.store_locale_data(data, root.as_ref());
    }

    fn request(&self, params: &LoadParams) -> Result<Request, LocaleDataError> {
        if params.category.is_empty() {
            return Err(LocaleDataError::invalid_options("a category is required"));
        }
        if params.cross_roots && params.mode != LoadMode::Cascade {
            return Err(LocaleDataError::invalid_options(format!(
                "cross_roots cannot be combined with {:?}",
                params.mode
            )));
        }

        let locale = match &params.locale {
            Some(tag) => LocaleSpec::parse(tag)?,
            None => self.locale.clone().unwrap_or_else(current_locale),
        };

        Ok(Request {
            category: params.category.clone(),
            chain: sublocales(&locale),
            locale,
            mode: params.mode,
            cross_roots: params.cross_roots,
            options: MergeOptions {
                concat_arrays: params.concat_arrays,
            },
            cache_key: params.cache_key(),
        })
    }

    /// The consumer's cache of resolved results, emptied first if roots or
    /// cached fragments changed since it was last used.
    fn package_cache(&self) -> Option<SharedCache> {
        if !self.use_cache {
            return None;
        }

        let cache = self.context.caches().cache(&self.cache_identity);
        let generation = self.context.generation();
        if self.seen_generation.swap(generation, Ordering::SeqCst) != generation {
            debug!("Locale data changed; dropping resolved data of '{}'", self.name);
            cache.lock().clear();
        }
        Some(cache)
    }

    fn cached_result(&self, request: &Request) -> Option<Option<Value>> {
        let cache = self.package_cache()?;
        let entry = cache.lock().get(&request.cache_key, &request.locale)?;
        debug!(
            "Cache hit for {} in {} ('{}')",
            request.cache_key, request.locale, self.name
        );
        Some(entry.to_value())
    }

    fn pending_manifests(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        roots
            .iter()
            .filter(|root| self.context.manifest(root).is_none())
            .cloned()
            .collect()
    }

    fn apply_manifests(&self, roots: &[PathBuf], contents: Vec<Option<String>>) {
        for (root, content) in roots.iter().zip(contents) {
            let manifest = content.and_then(|content| match RootManifest::parse(&content) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    warn!("Ignoring manifest of {}: {}", root.display(), e);
                    None
                }
            });
            trace!(
                "Root {} has {}",
                root.display(),
                if manifest.is_some() { "a manifest" } else { "no manifest" }
            );
            self.context.store_manifest(root, manifest);
        }
    }

    fn manifest_paths(roots: &[PathBuf]) -> Vec<Option<PathBuf>> {
        roots.iter().map(|root| Some(root.join(MANIFEST_FILE))).collect()
    }

    /// Manifests cannot be read without synchronous support; roots then
    /// stay unindexed for this load.
    fn load_manifests_sync(&self, roots: &[PathBuf]) {
        let pending = self.pending_manifests(roots);
        if pending.is_empty() || !self.loader.supports_sync() {
            return;
        }
        match self.loader.load_files_sync(&Self::manifest_paths(&pending)) {
            Ok(contents) => self.apply_manifests(&pending, contents),
            Err(e) => warn!("Could not read manifests: {}", e),
        }
    }

    async fn load_manifests(&self, roots: &[PathBuf]) {
        let pending = self.pending_manifests(roots);
        if pending.is_empty() {
            return;
        }
        let contents = self.loader.load_files(&Self::manifest_paths(&pending)).await;
        self.apply_manifests(&pending, contents);
    }

    /// Reads whole-locale files not read before and caches their fragments.
    /// Returns the categories found.
    async fn prefetch_locale_files(&self, chain: &[LocaleSpec], roots: &[PathBuf]) -> BTreeSet<String> {
        if !self.use_cache {
            return BTreeSet::new();
        }

        let extensions = self.decoders.extensions();
        let mut targets: Vec<(&Path, PathBuf)> = Vec::new();
        for level in chain {
            for root in roots {
                let manifest = self.context.manifest(root).flatten();
                for ext in &extensions {
                    if let Some(manifest) = &manifest
                        && !manifest.contains(&whole_locale_relative(level, ext))
                    {
                        continue;
                    }
                    let path = whole_locale_path(root, level, ext);
                    if !self.context.fragments().is_file_loaded(&path) {
                        targets.push((root.as_path(), path));
                    }
                }
            }
        }
        if targets.is_empty() {
            return BTreeSet::new();
        }

        let paths: Vec<Option<PathBuf>> = targets.iter().map(|(_, path)| Some(path.clone())).collect();
        let contents = self.loader.load_files(&paths).await;

        let mut categories = BTreeSet::new();
        for ((root, path), content) in targets.into_iter().zip(contents) {
            self.context.fragments().mark_file_loaded(&path);
            let Some(content) = content else {
                continue;
            };
            match self.decoders.decode(&path, &content) {
                Ok(Some(data)) => {
                    debug!("Loaded whole-locale file {}", path.display());
                    categories.extend(self.store_locale_data(&data, root));
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring whole-locale file {}: {}", path.display(), e),
            }
        }
        categories
    }

    fn store_locale_data(&self, data: &Value, root: &Path) -> BTreeSet<String> {
        let mut categories = BTreeSet::new();
        let Value::Object(locales) = data else {
            warn!("Locale data for {} is not an object", root.display());
            return categories;
        };

        let cache = self.context.root_cache(root);
        {
            let mut cache = cache.lock();
            for (tag, by_category) in locales {
                let locale = match LocaleSpec::parse(tag) {
                    Ok(locale) => locale,
                    Err(e) => {
                        warn!("Skipping locale data for '{}': {}", tag, e);
                        continue;
                    }
                };
                let Value::Object(by_category) = by_category else {
                    warn!("Locale data for '{}' is not an object", tag);
                    continue;
                };
                for (category, value) in by_category {
                    cache.store(category, &locale, Some(CacheEntry::data(value.clone())));
                    categories.insert(category.clone());
                }
            }
        }

        if !categories.is_empty() {
            self.context.bump_epoch();
        }
        categories
    }

    /// Reads the root list and plans every slot against it.
    fn plan(&self, request: &Request) -> Plan {
        let generation = self.context.generation();
        let roots = self.roots();
        let extensions = self.decoders.extensions();
        let slots = request
            .chain
            .iter()
            .map(|level| {
                roots
                    .iter()
                    .map(|root| self.plan_slot(&request.category, root, level, &extensions))
                    .collect()
            })
            .collect();
        Plan {
            generation,
            roots,
            slots,
        }
    }

    fn plan_slot(&self, category: &str, root: &Path, level: &LocaleSpec, extensions: &[&str]) -> Slot {
        if self.use_cache
            && let Some(entry) = self.context.root_cache(root).lock().get(category, level)
        {
            return Slot::Known(match entry {
                CacheEntry::Absent => None,
                CacheEntry::Data(data) => Some(data),
            });
        }
        if self.use_cache && self.miss_cache(root).lock().contains(category, level) {
            return Slot::Known(None);
        }

        let manifest = self.context.manifest(root).flatten();
        let paths: Vec<PathBuf> = extensions
            .iter()
            .filter(|ext| {
                manifest
                    .as_ref()
                    .is_none_or(|manifest| manifest.contains(&split_relative(level, category, ext)))
            })
            .map(|ext| split_path(root, level, category, ext))
            .collect();

        if paths.is_empty() {
            self.store_fragment(root, category, level, None);
            return Slot::Known(None);
        }
        Slot::Fetch(paths)
    }

    fn store_fragment(&self, root: &Path, category: &str, level: &LocaleSpec, data: Option<Arc<Value>>) {
        if !self.use_cache {
            return;
        }
        match data {
            Some(data) => self.context.root_cache(root).lock().store(
                category,
                level,
                Some(CacheEntry::Data(data)),
            ),
            None => self
                .miss_cache(root)
                .lock()
                .store(category, level, Some(CacheEntry::Absent)),
        }
    }

    /// Absences confirmed in `root` with this instance's decoders.
    fn miss_cache(&self, root: &Path) -> SharedCache {
        self.context.miss_cache(root, &self.decoders.extensions())
    }

    /// Decodes the first candidate that yields data.
    fn decode_first(&self, candidates: Vec<(PathBuf, Option<String>)>) -> Option<Value> {
        for (path, content) in candidates {
            let Some(content) = content else {
                continue;
            };
            match self.decoders.decode(&path, &content) {
                Ok(Some(data)) => {
                    trace!("Loaded {}", path.display());
                    return Some(data);
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Applies fetched contents to the plan, reduces and caches the result.
    fn finish(&self, request: &Request, plan: Plan, contents: Vec<Option<String>>) -> Option<Value> {
        let Plan {
            generation,
            roots,
            slots,
        } = plan;
        let mut contents = contents.into_iter();

        let grid: Vec<Vec<Option<Arc<Value>>>> = slots
            .into_iter()
            .zip(&request.chain)
            .map(|(row, level)| {
                row.into_iter()
                    .zip(&roots)
                    .map(|(slot, root)| match slot {
                        Slot::Known(data) => data,
                        Slot::Fetch(paths) => {
                            let candidates: Vec<(PathBuf, Option<String>)> = paths
                                .into_iter()
                                .map(|path| (path, contents.next().flatten()))
                                .collect();
                            let data = self.decode_first(candidates).map(Arc::new);
                            self.store_fragment(root, &request.category, level, data.clone());
                            data
                        }
                    })
                    .collect()
            })
            .collect();

        let result = Self::reduce(request, &grid);
        if self.context.generation() != generation {
            debug!(
                "Locale data changed while loading {} for {}; result of '{}' not cached",
                request.cache_key, request.locale, self.name
            );
        } else if let Some(cache) = self.package_cache() {
            cache.lock().store(
                &request.cache_key,
                &request.locale,
                Some(CacheEntry::from_option(result.clone())),
            );
        }
        result
    }

    /// The data of one level, from the roots holding it in precedence order.
    fn level_data(request: &Request, row: &[Option<Arc<Value>>]) -> Option<Value> {
        if request.cross_roots {
            merge_all(
                row.iter().rev().flatten().map(|data| &**data),
                request.options,
            )
        } else {
            row.iter().flatten().next().map(|data| Value::clone(data))
        }
    }

    fn reduce(request: &Request, grid: &[Vec<Option<Arc<Value>>>]) -> Option<Value> {
        match request.mode {
            LoadMode::Cascade => {
                let levels: Vec<Value> = grid
                    .iter()
                    .filter_map(|row| Self::level_data(request, row))
                    .collect();
                merge_all(&levels, request.options)
            }
            LoadMode::MostSpecific => grid
                .iter()
                .rev()
                .find_map(|row| Self::level_data(request, row)),
            LoadMode::FirstFound => grid.iter().find_map(|row| Self::level_data(request, row)),
        }
    }
}

impl fmt::Debug for LocaleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleData")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("sync", &self.sync)
            .field("use_cache", &self.use_cache)
            .field("loader", &self.loader.name())
            .field("decoders", &self.decoders)
            .finish_non_exhaustive()
    }
}
