//! Producer ranking by hash distance from the previous delta.

use shared_types::{sha256_concat, Hash, PeerId};

/// Ranking key of `peer` for the round following `previous_delta_hash`.
pub fn producer_rank_digest(peer: &PeerId, previous_delta_hash: &Hash) -> Hash {
    sha256_concat(&[peer.as_bytes(), previous_delta_hash])
}

/// Order `peers` for the round: ascending digest, peer id as tie-break.
///
/// Duplicates are collapsed, so the result is a permutation of the distinct
/// input peers and does not depend on their enumeration order.
pub fn rank_producers(previous_delta_hash: &Hash, peers: impl IntoIterator<Item = PeerId>) -> Vec<PeerId> {
    let mut keyed: Vec<(Hash, PeerId)> = peers
        .into_iter()
        .map(|peer| (producer_rank_digest(&peer, previous_delta_hash), peer))
        .collect();
    keyed.sort_unstable();
    keyed.dedup_by(|a, b| a.1 == b.1);
    keyed.into_iter().map(|(_, peer)| peer).collect()
}
