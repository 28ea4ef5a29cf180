use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::cache::{CacheStats, SetCache};
use super::key::{identifier_key, narrowing_candidates, reduce_key};
use super::ResolverError;
use crate::config::ResolverConfig;
use crate::external_catalog::{LegoSet, SetCatalog, SetLookup};
use crate::metrics;

/// Fallback set served when a query resolves to nothing (8014-1, the 2009
/// Clone Walker Battle Pack).
pub const DEFAULT_SET_ID: i32 = 8014;

/// Outcome of resolving a query with default substitution applied.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resolution {
    /// The query as submitted.
    pub query: String,
    /// Identifier key derived from the query.
    pub key: i32,
    /// The set to show.
    pub set: LegoSet,
    /// True when no set was reachable from the key and `set` is the default.
    pub is_default: bool,
}

impl Resolution {
    /// One-line message announcing the result.
    pub fn headline(&self) -> String {
        if self.is_default {
            format!(
                "You don't have a unique set. Here's the {} {}!",
                self.set.year, self.set.name
            )
        } else {
            format!("Your set is: {}", self.set.name)
        }
    }
}

/// Resolves queries to sets through a [`SetCatalog`], memoizing every answer.
///
/// Lifecycle: construct, call [`init`](Self::init) once to prime the default
/// set, then share (behind an `Arc`) for the rest of the process.
pub struct SetResolver {
    catalog: Arc<dyn SetCatalog>,
    cache: SetCache,
    default_set_id: i32,
}

impl SetResolver {
    /// Create a resolver using [`DEFAULT_SET_ID`] as the fallback.
    pub fn new(catalog: Arc<dyn SetCatalog>) -> Self {
        Self::with_default_set(catalog, DEFAULT_SET_ID)
    }

    pub fn with_default_set(catalog: Arc<dyn SetCatalog>, default_set_id: i32) -> Self {
        Self {
            catalog,
            cache: SetCache::new(),
            default_set_id: reduce_key(default_set_id),
        }
    }

    pub fn from_config(catalog: Arc<dyn SetCatalog>, config: &ResolverConfig) -> Self {
        Self::with_default_set(catalog, config.default_set_id)
    }

    pub fn default_set_id(&self) -> i32 {
        self.default_set_id
    }

    pub fn cache(&self) -> &SetCache {
        &self.cache
    }

    /// Prime the cache with the default set.
    ///
    /// Must succeed before [`resolve_or_default`](Self::resolve_or_default)
    /// can substitute anything.
    pub async fn init(&self) -> Result<LegoSet, ResolverError> {
        info!(
            "Priming set cache with default set {} via {}",
            self.default_set_id,
            self.catalog.name()
        );

        match self.resolve_key(self.default_set_id).await? {
            SetLookup::Found(set) => {
                info!("Default set: {} ({})", set.name, set.set_num);
                Ok(set)
            }
            SetLookup::NotFound => Err(ResolverError::DefaultUnavailable(self.default_set_id)),
        }
    }

    /// Resolve a free-text query.
    ///
    /// `NotFound` means neither the key nor any of its narrowed candidates has
    /// a set; substituting the default is left to the caller.
    pub async fn resolve(&self, query: &str) -> Result<SetLookup, ResolverError> {
        let key = identifier_key(query);
        debug!("Resolving query '{}' -> key {}", query, key);
        self.resolve_key(key).await
    }

    /// Resolve an identifier directly (it is reduced into key range first).
    pub async fn resolve_key(&self, id: i32) -> Result<SetLookup, ResolverError> {
        let result = self.resolve_reduced(reduce_key(id)).await;

        let label = match &result {
            Ok(SetLookup::Found(_)) => "found",
            Ok(SetLookup::NotFound) => "not_found",
            Err(_) => "error",
        };
        metrics::RESOLUTIONS.with_label_values(&[label]).inc();

        result
    }

    /// Resolve a query, substituting the default set when nothing is found.
    pub async fn resolve_or_default(&self, query: &str) -> Result<Resolution, ResolverError> {
        let key = identifier_key(query);

        let (set, is_default) = match self.resolve_key(key).await? {
            SetLookup::Found(set) => (set, false),
            SetLookup::NotFound => {
                let set = self.default_set().await.ok_or(ResolverError::NotPrimed)?;
                info!(
                    "No set for query '{}' (key {}), using default set {}",
                    query, key, set.set_num
                );
                metrics::DEFAULT_SUBSTITUTIONS.inc();
                (set, true)
            }
        };

        Ok(Resolution {
            query: query.to_string(),
            key,
            set,
            is_default,
        })
    }

    /// The primed default set, if [`init`](Self::init) has succeeded.
    pub async fn default_set(&self) -> Option<LegoSet> {
        self.cache
            .get(self.default_set_id)
            .await
            .and_then(SetLookup::into_set)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn resolve_reduced(&self, key: i32) -> Result<SetLookup, ResolverError> {
        let mut outcome = match self.cache.get(key).await {
            Some(cached) => {
                metrics::CACHE_HITS.with_label_values(&["entry"]).inc();
                cached
            }
            None => {
                let lookup = self.probe(key).await?;
                self.cache.insert(key, lookup.clone()).await;
                lookup
            }
        };

        // The entry for `key` is overwritten with every narrowed answer.
        let mut steps = 0u32;
        for candidate in narrowing_candidates(key) {
            if outcome.is_found() {
                break;
            }
            debug!("No set at {}, narrowing to {}", key, candidate);
            outcome = self.probe(candidate).await?;
            self.cache.insert(key, outcome.clone()).await;
            steps += 1;
        }

        metrics::NARROWING_STEPS.observe(steps as f64);

        Ok(outcome)
    }

    /// Answer for exactly `id`, from memory when possible.
    async fn probe(&self, id: i32) -> Result<SetLookup, ResolverError> {
        if let Some(cached) = self.cache.probe(id).await {
            metrics::CACHE_HITS.with_label_values(&["probe"]).inc();
            return Ok(cached);
        }

        let catalog = self.catalog.name();
        let timer = metrics::CATALOG_LOOKUP_DURATION
            .with_label_values(&[catalog])
            .start_timer();
        let result = self.catalog.lookup_set(id).await;
        timer.observe_duration();

        match result {
            Ok(lookup) => {
                let outcome = if lookup.is_found() { "found" } else { "not_found" };
                metrics::CATALOG_LOOKUPS
                    .with_label_values(&[catalog, outcome])
                    .inc();
                debug!("Catalog {} answered set {}: {}", catalog, id, outcome);

                self.cache.record_probe(id, lookup.clone()).await;
                Ok(lookup)
            }
            Err(e) => {
                metrics::CATALOG_LOOKUPS
                    .with_label_values(&[catalog, "error"])
                    .inc();
                warn!("Catalog {} lookup for set {} failed: {}", catalog, id, e);
                Err(ResolverError::Catalog { id, source: e })
            }
        }
    }
}
