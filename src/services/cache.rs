use crate::core::RegionCatalog;
use crate::models::RosterEntry;
use crate::services::dashboard::{DashboardClient, DashboardError};
use moka::future::{Cache, CacheBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Snapshot load failed: {0}")]
    LoadError(#[from] Arc<DashboardError>),
}

/// In-memory cache of the roster and region snapshots
///
/// Both inputs are fetched once and then reused until the TTL lapses or
/// the cache is invalidated, so consecutive previews run against the same
/// data. Concurrent misses for the same key share one backend fetch.
pub struct SnapshotCache {
    rosters: Cache<String, Arc<Vec<RosterEntry>>>,
    regions: Cache<String, Arc<RegionCatalog>>,
    ttl_secs: u64,
    capacity: u64,
}

impl SnapshotCache {
    /// Create a new snapshot cache holding at most `capacity` snapshots per kind
    pub fn new(ttl_secs: u64, capacity: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        Self {
            rosters: CacheBuilder::new(capacity).time_to_live(ttl).build(),
            regions: CacheBuilder::new(capacity).time_to_live(ttl).build(),
            ttl_secs,
            capacity,
        }
    }

    /// Get the roster, fetching it on a miss
    pub async fn roster(&self, client: &DashboardClient) -> Result<Arc<Vec<RosterEntry>>, CacheError> {
        let key = CacheKey::roster();
        let roster = self
            .rosters
            .try_get_with(key.clone(), async {
                tracing::trace!("Cache miss: {}", key);
                client.fetch_roster().await.map(Arc::new)
            })
            .await?;
        Ok(roster)
    }

    /// Get the region catalog, fetching it on a miss
    pub async fn regions(&self, client: &DashboardClient) -> Result<Arc<RegionCatalog>, CacheError> {
        let key = CacheKey::regions();
        let regions = self
            .regions
            .try_get_with(key.clone(), async {
                tracing::trace!("Cache miss: {}", key);
                client.fetch_regions().await.map(Arc::new)
            })
            .await?;
        Ok(regions)
    }

    /// Drop both snapshots so the next read refetches
    pub fn invalidate_all(&self) {
        self.rosters.invalidate_all();
        self.regions.invalidate_all();
        tracing::debug!("Invalidated roster and region snapshots");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            roster_entries: self.rosters.entry_count(),
            region_entries: self.regions.entry_count(),
            ttl_secs: self.ttl_secs,
            capacity: self.capacity,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub roster_entries: u64,
    pub region_entries: u64,
    pub ttl_secs: u64,
    pub capacity: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the cache key for the user roster
    pub fn roster() -> String {
        "snapshot:roster".to_string()
    }

    /// Build the cache key for the region catalog
    pub fn regions() -> String {
        "snapshot:regions".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::roster(), "snapshot:roster");
        assert_eq!(CacheKey::regions(), "snapshot:regions");
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = SnapshotCache::new(60, 4);
        let stats = cache.stats();
        assert_eq!(stats.roster_entries, 0);
        assert_eq!(stats.region_entries, 0);
        assert_eq!(stats.ttl_secs, 60);
        assert_eq!(stats.capacity, 4);
    }

    #[test]
    fn test_failed_load_surfaces_error() {
        let cache = SnapshotCache::new(60, 4);
        let client = DashboardClient::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();

        let result = tokio_test::block_on(cache.roster(&client));
        assert!(matches!(result, Err(CacheError::LoadError(_))));
    }
}
