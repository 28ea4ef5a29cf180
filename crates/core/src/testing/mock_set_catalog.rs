//! Mock set catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external_catalog::{CatalogError, LegoSet, SetCatalog, SetLookup};

/// Mock implementation of the SetCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable sets by identifier
/// - Track lookups for assertions
/// - Simulate one-off and persistent failures
///
/// # Example
///
/// ```rust,ignore
/// use brickfind_core::testing::{MockSetCatalog, fixtures};
///
/// let catalog = MockSetCatalog::new();
/// catalog.add_set(8014, fixtures::default_set()).await;
///
/// let lookup = catalog.lookup_set(8014).await?;
/// assert!(lookup.is_found());
/// assert_eq!(catalog.recorded_lookups().await, vec![8014]);
/// ```
#[derive(Debug)]
pub struct MockSetCatalog {
    /// Sets by identifier.
    sets: Arc<RwLock<HashMap<i32, LegoSet>>>,
    /// Recorded lookups, in call order.
    lookups: Arc<RwLock<Vec<i32>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Identifiers that fail on every lookup.
    failing: Arc<RwLock<HashSet<i32>>>,
}

impl Default for MockSetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSetCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            sets: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    // =========================================================================
    // Catalog Contents
    // =========================================================================

    /// Serve `set` for identifier `id`.
    pub async fn add_set(&self, id: i32, set: LegoSet) {
        self.sets.write().await.insert(id, set);
    }

    /// Remove all sets.
    pub async fn clear_sets(&self) {
        self.sets.write().await.clear();
    }

    // =========================================================================
    // Lookup Recording
    // =========================================================================

    /// Get all recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<i32> {
        self.lookups.read().await.clone()
    }

    /// Clear recorded lookups.
    pub async fn clear_recorded(&self) {
        self.lookups.write().await.clear();
    }

    /// Get the number of lookups performed.
    pub async fn lookup_count(&self) -> usize {
        self.lookups.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every lookup of `id` fail until [`clear_failures`](Self::clear_failures).
    pub async fn fail_on(&self, id: i32) {
        self.failing.write().await.insert(id);
    }

    /// Clear pending and persistent failures.
    pub async fn clear_failures(&self) {
        *self.next_error.write().await = None;
        self.failing.write().await.clear();
    }
}

#[async_trait]
impl SetCatalog for MockSetCatalog {
    async fn lookup_set(&self, id: i32) -> Result<SetLookup, CatalogError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.lookups.write().await.push(id);

        if self.failing.read().await.contains(&id) {
            return Err(CatalogError::ApiError {
                status: 503,
                message: format!("Injected failure for set {}", id),
            });
        }

        Ok(self.sets.read().await.get(&id).cloned().into())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_lookup_found_and_missing() {
        let catalog = MockSetCatalog::new();
        catalog.add_set(8014, fixtures::default_set()).await;

        assert!(catalog.lookup_set(8014).await.unwrap().is_found());
        assert!(catalog.lookup_set(801).await.unwrap().is_not_found());
        assert_eq!(catalog.recorded_lookups().await, vec![8014, 801]);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let catalog = MockSetCatalog::new();
        catalog
            .set_next_error(CatalogError::RateLimitExceeded)
            .await;

        let result = catalog.lookup_set(1).await;
        assert!(matches!(result, Err(CatalogError::RateLimitExceeded)));

        // Error should be consumed
        assert!(catalog.lookup_set(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_persistent_failure() {
        let catalog = MockSetCatalog::new();
        catalog.fail_on(42).await;

        assert!(catalog.lookup_set(42).await.is_err());
        assert!(catalog.lookup_set(42).await.is_err());
        assert!(catalog.lookup_set(43).await.is_ok());

        catalog.clear_failures().await;
        assert!(catalog.lookup_set(42).await.is_ok());
        assert_eq!(catalog.lookup_count().await, 4);
    }
}
