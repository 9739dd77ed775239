//! Domain layer for candidate construction and producer ranking.

pub mod isaac;
pub mod ordering;
pub mod packing;
pub mod ranking;

pub use isaac::{deterministic_random_from_seed, salt_from_previous_delta, IsaacRandom};
pub use ordering::{candidate_hash, salted_order, sorted_signatures, RawEntryWithSaltedEntry};
pub use packing::{filter_includable, pack_by_gas_price, PackedTransactions, RejectionReason};
pub use ranking::{producer_rank_digest, rank_producers};
