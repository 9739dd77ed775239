//! # Delta-Ledger Benchmarks
//!
//! Criterion groups per subsystem, registered in `benches/subsystem_benchmarks.rs`.

pub mod dl_02_delta_builder;
pub mod dl_04_consensus;

use shared_types::{MempoolTransaction, PeerId, PublicEntry, PUBLIC_ENTRY_VERSION};

/// `count` distinct includable transactions.
pub fn transactions(count: usize) -> Vec<MempoolTransaction> {
    (0..count)
        .map(|i| {
            let bytes = (i as u64).to_le_bytes();
            let mut signature = [0u8; 64];
            signature[..8].copy_from_slice(&bytes);
            MempoolTransaction {
                entry: PublicEntry {
                    sender_public_key: [1u8; 32],
                    receiver_public_key: [2u8; 32],
                    amount: i as u64,
                    data: bytes.to_vec(),
                },
                signature,
                lock_time: 0,
                version: PUBLIC_ENTRY_VERSION,
                fee: (i % 97) as u64,
                gas_limit: 21_000,
                gas_price: (i % 13) as u64,
                timestamp: i as u64,
            }
        })
        .collect()
}

/// `count` distinct peer ids.
pub fn peers(count: usize) -> Vec<PeerId> {
    (0..count)
        .map(|i| {
            let mut id = [0u8; 32];
            id[..8].copy_from_slice(&(i as u64).to_le_bytes());
            PeerId::from(id)
        })
        .collect()
}
