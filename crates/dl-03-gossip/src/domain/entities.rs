//! Per-message gossip state.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use super::GossipStats;

/// Counters for one correlation id.
///
/// All counters are atomics so concurrent receipts of the same message never
/// lose an increment and exactly one of them wins the right to forward.
#[derive(Debug)]
pub struct GossipEntry {
    broadcast_count: AtomicU32,
    received_count: AtomicU32,
    forwarded: AtomicBool,
    created_at: Instant,
}

impl GossipEntry {
    pub fn new(created_at: Instant) -> Self {
        Self {
            broadcast_count: AtomicU32::new(0),
            received_count: AtomicU32::new(0),
            forwarded: AtomicBool::new(false),
            created_at,
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }

    /// Count one receipt; returns the count including this one.
    pub fn record_receipt(&self) -> u32 {
        self.received_count
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1)
    }

    /// Claim the single forward of this message. Only the first caller gets `true`.
    pub fn claim_forward(&self) -> bool {
        !self.forwarded.swap(true, Ordering::AcqRel)
    }

    /// Reserve up to `wanted` sends without letting the total exceed `fanout`.
    ///
    /// Returns how many sends were granted.
    pub fn reserve_sends(&self, wanted: usize, fanout: usize) -> usize {
        let cap = u32::try_from(fanout).unwrap_or(u32::MAX);
        let wanted = u32::try_from(wanted).unwrap_or(u32::MAX);
        let previous = self
            .broadcast_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < cap).then(|| current.saturating_add(wanted).min(cap))
            })
            .unwrap_or(cap);
        (previous.saturating_add(wanted).min(cap) - previous.min(cap)) as usize
    }

    /// Give back reserved sends that did not go out.
    pub fn release_sends(&self, failed: usize) {
        let failed = u32::try_from(failed).unwrap_or(u32::MAX);
        let _ = self
            .broadcast_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(failed))
            });
    }

    pub fn stats(&self) -> GossipStats {
        GossipStats {
            broadcast_count: self.broadcast_count.load(Ordering::Acquire),
            received_count: self.received_count.load(Ordering::Acquire),
        }
    }
}
