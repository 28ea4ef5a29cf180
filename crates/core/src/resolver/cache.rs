//! In-memory set cache.
//!
//! Two tables live here:
//! - `entries`: identifier key -> resolved outcome. During narrowing the entry
//!   for the starting key is overwritten with each narrowed result, so it ends
//!   up holding the last probe's answer.
//! - `probes`: identifier -> the catalog's raw answer for exactly that
//!   identifier. Every identifier ever sent to the catalog lands here, which is
//!   what keeps repeated resolutions off the network.
//!
//! Nothing is ever evicted. Failed lookups are never cached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::external_catalog::SetLookup;

/// Snapshot of cache contents and counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Resolved keys.
    pub entries: usize,
    /// Resolved keys holding a set.
    pub found: usize,
    /// Resolved keys holding the not-found marker.
    pub not_found: usize,
    /// Distinct identifiers sent to the catalog.
    pub probes: usize,
    /// Probes answered from memory.
    pub hits: u64,
    /// Probes that went to the catalog.
    pub remote_lookups: u64,
}

#[derive(Debug, Default)]
struct CacheTables {
    entries: HashMap<i32, SetLookup>,
    probes: HashMap<i32, SetLookup>,
}

/// Process-lifetime cache of catalog answers.
#[derive(Debug, Default)]
pub struct SetCache {
    tables: RwLock<CacheTables>,
    hits: AtomicU64,
    remote_lookups: AtomicU64,
}

impl SetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved outcome stored under `key`.
    pub async fn get(&self, key: i32) -> Option<SetLookup> {
        self.tables.read().await.entries.get(&key).cloned()
    }

    /// Store (or overwrite) the resolved outcome for `key`.
    pub async fn insert(&self, key: i32, lookup: SetLookup) {
        self.tables.write().await.entries.insert(key, lookup);
    }

    /// Catalog answer previously recorded for identifier `id`.
    ///
    /// Counts a hit when present.
    pub async fn probe(&self, id: i32) -> Option<SetLookup> {
        let cached = self.tables.read().await.probes.get(&id).cloned();
        if cached.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        cached
    }

    /// Record the catalog's answer for identifier `id`.
    pub async fn record_probe(&self, id: i32, lookup: SetLookup) {
        self.remote_lookups.fetch_add(1, Ordering::Relaxed);
        self.tables.write().await.probes.insert(id, lookup);
    }

    pub async fn stats(&self) -> CacheStats {
        let tables = self.tables.read().await;
        let found = tables.entries.values().filter(|l| l.is_found()).count();

        CacheStats {
            entries: tables.entries.len(),
            found,
            not_found: tables.entries.len() - found,
            probes: tables.probes.len(),
            hits: self.hits.load(Ordering::Relaxed),
            remote_lookups: self.remote_lookups.load(Ordering::Relaxed),
        }
    }
}
