//! Candidate scoring and the local favourite.

use parking_lot::Mutex;
use shared_types::{short_hex, CandidateDelta, FavouriteDelta, Hash, PeerId};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::BoundedMap;

/// A candidate and the weight this node gives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: CandidateDelta,
    pub score: u64,
}

/// Scores incoming candidates per round.
///
/// A candidate's first sighting is worth `100 × (producers − rank) + 1`; each
/// repeat adds 1.
pub struct DeltaVoter {
    local_peer_id: PeerId,
    rounds: Mutex<BoundedMap<Hash, HashMap<Hash, ScoredCandidate>>>,
}

impl DeltaVoter {
    pub fn new(local_peer_id: PeerId, retained_rounds: usize) -> Self {
        Self {
            local_peer_id,
            rounds: Mutex::new(BoundedMap::new(retained_rounds)),
        }
    }

    /// Score `candidate` against the round's ranked `producers`.
    ///
    /// Returns the candidate's score, or `None` if its producer is not in the
    /// ranking (the candidate is then ignored).
    pub fn on_candidate(&self, candidate: CandidateDelta, producers: &[PeerId]) -> Option<u64> {
        let Some(rank) = producers.iter().position(|p| *p == candidate.producer_id) else {
            debug!(
                producer = %candidate.producer_id,
                previous = %short_hex(&candidate.previous_delta_hash),
                "Ignoring candidate from a peer that is not a producer this round"
            );
            return None;
        };

        let mut rounds = self.rounds.lock();
        let round = rounds.get_or_insert_with(candidate.previous_delta_hash, HashMap::new);
        let scored = round
            .entry(candidate.hash)
            .and_modify(|scored| scored.score = scored.score.saturating_add(1))
            .or_insert_with(|| ScoredCandidate {
                candidate,
                score: 100 * (producers.len() - rank) as u64 + 1,
            });
        trace!(
            candidate = %short_hex(&candidate.hash),
            score = scored.score,
            "Scored candidate"
        );
        Some(scored.score)
    }

    /// The best-scored candidate for the round after `previous_delta_hash`,
    /// lowest hash first among equal scores.
    pub fn favourite_delta(&self, previous_delta_hash: &Hash) -> Option<FavouriteDelta> {
        let rounds = self.rounds.lock();
        let best = rounds
            .get(previous_delta_hash)?
            .values()
            .min_by_key(|scored| (Reverse(scored.score), scored.candidate.hash))?;
        Some(FavouriteDelta {
            candidate: best.candidate,
            voter_id: self.local_peer_id,
        })
    }

    pub fn score_of(&self, previous_delta_hash: &Hash, candidate_hash: &Hash) -> Option<u64> {
        self.rounds
            .lock()
            .get(previous_delta_hash)?
            .get(candidate_hash)
            .map(|scored| scored.score)
    }

    /// Every candidate scored so far for the round after `previous_delta_hash`.
    pub fn scored_candidates(&self, previous_delta_hash: &Hash) -> Vec<ScoredCandidate> {
        self.rounds
            .lock()
            .get(previous_delta_hash)
            .map(|round| round.values().copied().collect())
            .unwrap_or_default()
    }
}
