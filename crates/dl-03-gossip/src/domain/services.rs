//! Domain services for gossip.

use shared_types::PeerId;

/// Pick the first `fanout` peers of `known`, skipping the local node and the
/// message's originator.
pub fn select_gossip_targets(
    known: &[PeerId],
    local: &PeerId,
    originator: &PeerId,
    fanout: usize,
) -> Vec<PeerId> {
    let mut targets = Vec::with_capacity(fanout.min(known.len()));
    for peer in known {
        if targets.len() == fanout {
            break;
        }
        if peer == local || peer == originator || targets.contains(peer) {
            continue;
        }
        targets.push(*peer);
    }
    targets
}
