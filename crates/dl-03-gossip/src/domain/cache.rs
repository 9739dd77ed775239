//! TTL-bounded table of gossip counters keyed by correlation id.

use dashmap::DashMap;
use shared_types::CorrelationId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::{GossipEntry, GossipStats};

/// Concurrent gossip cache.
///
/// Expiry is lazy: an expired entry is replaced on its next access and is
/// invisible to lookups. [`GossipCache::sweep_expired`] reclaims the rest.
pub struct GossipCache {
    entries: DashMap<CorrelationId, Arc<GossipEntry>>,
    ttl: Duration,
}

impl GossipCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Live entry for `id`, created fresh if absent or expired.
    pub fn entry(&self, id: CorrelationId) -> Arc<GossipEntry> {
        let now = Instant::now();
        let mut slot = self
            .entries
            .entry(id)
            .or_insert_with(|| Arc::new(GossipEntry::new(now)));
        if slot.is_expired(now, self.ttl) {
            *slot = Arc::new(GossipEntry::new(now));
        }
        Arc::clone(slot.value())
    }

    pub fn stats(&self, id: &CorrelationId) -> Option<GossipStats> {
        let now = Instant::now();
        self.entries
            .get(id)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.stats())
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired(now, self.ttl));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_recounted() {
        let cache = GossipCache::new(Duration::from_secs(5));
        let id = CorrelationId::generate();
        cache.entry(id).record_receipt();
        cache.entry(id).record_receipt();
        assert_eq!(cache.stats(&id).map(|s| s.received_count), Some(2));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.stats(&id), None);
        assert_eq!(cache.entry(id).record_receipt(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_expired() {
        let cache = GossipCache::new(Duration::from_secs(5));
        let old = CorrelationId::generate();
        cache.entry(old);
        tokio::time::advance(Duration::from_secs(3)).await;
        let young = CorrelationId::generate();
        cache.entry(young);
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.stats(&young).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_id_has_no_stats() {
        let cache = GossipCache::new(Duration::from_secs(5));
        assert!(cache.stats(&CorrelationId::generate()).is_none());
        assert!(cache.is_empty());
    }
}
