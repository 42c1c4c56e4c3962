//! Time-boxed cache for the bulk content snapshot.
//!
//! One `/cms/all` result is held for a fixed TTL (30 seconds). Within the
//! window reads are served from memory with no network call; after it the
//! next read refetches and replaces the slot. The TTL check and refill are
//! deliberately not atomic across callers: two near-simultaneous misses may
//! each fetch, which is fine for an idempotent read.

use std::time::{Duration, Instant};

use crate::types::AllContent;

/// Maximum age of a cached snapshot before a refetch is required.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    slot: Option<(AllContent, Instant)>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached snapshot, if one exists and is still within the TTL.
    pub fn get(&self, now: Instant) -> Option<&AllContent> {
        match &self.slot {
            Some((snapshot, cached_at))
                if now.saturating_duration_since(*cached_at) < self.ttl =>
            {
                Some(snapshot)
            }
            _ => None,
        }
    }

    /// Replace the cached snapshot.
    pub fn put(&mut self, snapshot: AllContent, fetched_at: Instant) {
        self.slot = Some((snapshot, fetched_at));
    }

    /// Drop the cached snapshot. Callers needing fresh data immediately after
    /// a mutation use this; otherwise staleness up to the TTL is tolerated.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_content;

    #[test]
    fn empty_cache_misses() {
        let cache = SnapshotCache::default();
        assert!(cache.get(Instant::now()).is_none());
    }

    #[test]
    fn snapshot_is_served_within_the_ttl() {
        let mut cache = SnapshotCache::default();
        let t0 = Instant::now();
        cache.put(default_content(), t0);

        assert!(cache.get(t0).is_some());
        assert!(cache.get(t0 + Duration::from_secs(29)).is_some());
    }

    #[test]
    fn snapshot_expires_after_the_ttl() {
        let mut cache = SnapshotCache::default();
        let t0 = Instant::now();
        cache.put(default_content(), t0);

        assert!(cache.get(t0 + Duration::from_secs(30)).is_none());
        assert!(cache.get(t0 + Duration::from_secs(120)).is_none());
    }

    #[test]
    fn clear_empties_the_slot_immediately() {
        let mut cache = SnapshotCache::default();
        let t0 = Instant::now();
        cache.put(default_content(), t0);
        cache.clear();
        assert!(cache.get(t0).is_none());
    }

    #[test]
    fn put_replaces_the_previous_snapshot() {
        let mut cache = SnapshotCache::default();
        let t0 = Instant::now();
        cache.put(default_content(), t0);

        let mut newer = default_content();
        newer.about.mission = "Updated mission".into();
        let t1 = t0 + Duration::from_secs(31);
        cache.put(newer, t1);

        let cached = cache.get(t1).unwrap();
        assert_eq!(cached.about.mission, "Updated mission");
    }
}
