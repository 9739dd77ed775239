//! Vote collection and election of the round's delta.

use parking_lot::Mutex;
use shared_types::{short_hex, CandidateDelta, FavouriteDelta, Hash, PeerId};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::BoundedMap;

/// Votes of one round keyed by (candidate hash, voter).
type Ballot = HashMap<(Hash, PeerId), CandidateDelta>;

/// Counts favourites per round and elects the most popular candidate.
pub struct DeltaElector {
    rounds: Mutex<BoundedMap<Hash, Ballot>>,
}

impl DeltaElector {
    pub fn new(retained_rounds: usize) -> Self {
        Self {
            rounds: Mutex::new(BoundedMap::new(retained_rounds)),
        }
    }

    /// Record a vote. Votes from peers outside `producers` are discarded and a
    /// voter counts once per candidate.
    ///
    /// Returns whether the vote was new.
    pub fn on_favourite(&self, favourite: FavouriteDelta, producers: &[PeerId]) -> bool {
        if !producers.contains(&favourite.voter_id) {
            debug!(
                voter = %favourite.voter_id,
                previous = %short_hex(&favourite.candidate.previous_delta_hash),
                "Discarding vote from a peer that is not a producer this round"
            );
            return false;
        }

        let mut rounds = self.rounds.lock();
        let ballot = rounds.get_or_insert_with(
            favourite.candidate.previous_delta_hash,
            HashMap::new,
        );
        let key = (favourite.candidate.hash, favourite.voter_id);
        if ballot.contains_key(&key) {
            return false;
        }
        ballot.insert(key, favourite.candidate);
        true
    }

    /// The candidate with the most votes, at least `producer_count / 3` of
    /// them; the highest hash wins a tie.
    pub fn most_popular_candidate(
        &self,
        previous_delta_hash: &Hash,
        producer_count: usize,
    ) -> Option<CandidateDelta> {
        let rounds = self.rounds.lock();
        let Some(ballot) = rounds.get(previous_delta_hash) else {
            debug!(
                previous = %short_hex(previous_delta_hash),
                "No votes for this round"
            );
            return None;
        };

        let mut tally: BTreeMap<Hash, (usize, CandidateDelta)> = BTreeMap::new();
        for ((hash, _voter), candidate) in ballot {
            tally.entry(*hash).or_insert((0, *candidate)).0 += 1;
        }

        let threshold = producer_count / 3;
        let elected = tally
            .into_iter()
            .filter(|(_, (votes, _))| *votes >= threshold)
            .max_by_key(|(hash, (votes, _))| (*votes, *hash))
            .map(|(_, (_, candidate))| candidate);
        debug!(
            previous = %short_hex(previous_delta_hash),
            elected = ?elected.map(|c| short_hex(&c.hash)),
            threshold,
            "Election result"
        );
        elected
    }

    pub fn vote_count(&self, previous_delta_hash: &Hash, candidate_hash: &Hash) -> usize {
        self.rounds
            .lock()
            .get(previous_delta_hash)
            .map(|ballot| ballot.keys().filter(|(hash, _)| hash == candidate_hash).count())
            .unwrap_or(0)
    }
}
