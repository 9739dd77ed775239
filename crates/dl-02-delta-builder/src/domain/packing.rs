//! Selection of the mempool transactions that go into a delta.

use shared_types::MempoolTransaction;

/// Why a transaction was left out of the delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    /// Time-locked (`lock_time > 0`).
    TimeLocked,
    /// Payload longer than `MAX_ENTRY_DATA_LEN`.
    OversizedData(usize),
    /// Not a plain public entry.
    UnsupportedVersion(u32),
    /// Larger than the gas still available.
    ExceedsRemainingGas,
    /// The delta ran out of room for even the cheapest entry.
    DeltaFull,
}

/// Outcome of packing a mempool snapshot.
#[derive(Debug, Default)]
pub struct PackedTransactions {
    pub included: Vec<MempoolTransaction>,
    pub rejected: Vec<(MempoolTransaction, RejectionReason)>,
    pub gas_used: u64,
}

/// Keep only entries that may be included now: no lock time, format version 1,
/// payload within `MAX_ENTRY_DATA_LEN`.
pub fn filter_includable(
    transactions: Vec<MempoolTransaction>,
) -> (Vec<MempoolTransaction>, Vec<(MempoolTransaction, RejectionReason)>) {
    let mut includable = Vec::with_capacity(transactions.len());
    let mut rejected = Vec::new();
    for tx in transactions {
        if tx.lock_time > 0 {
            rejected.push((tx, RejectionReason::TimeLocked));
        } else if tx.has_oversized_data() {
            let len = tx.entry.data.len();
            rejected.push((tx, RejectionReason::OversizedData(len)));
        } else if !tx.is_includable() {
            let version = tx.version;
            rejected.push((tx, RejectionReason::UnsupportedVersion(version)));
        } else {
            includable.push(tx);
        }
    }
    (includable, rejected)
}

/// Pack by descending gas price under `delta_gas_limit`.
///
/// Once less than `min_entry_gas` remains, everything left is rejected as
/// [`RejectionReason::DeltaFull`]; before that, entries that do not fit are
/// skipped individually.
pub fn pack_by_gas_price(
    mut transactions: Vec<MempoolTransaction>,
    delta_gas_limit: u64,
    min_entry_gas: u64,
) -> PackedTransactions {
    transactions.sort_by(|a, b| b.gas_price.cmp(&a.gas_price));

    let mut packed = PackedTransactions::default();
    let mut remaining = transactions.into_iter();
    for tx in remaining.by_ref() {
        let headroom = delta_gas_limit.saturating_sub(packed.gas_used);
        if headroom < min_entry_gas {
            packed.rejected.push((tx, RejectionReason::DeltaFull));
            break;
        }
        if tx.gas_limit > headroom {
            packed.rejected.push((tx, RejectionReason::ExceedsRemainingGas));
            continue;
        }
        packed.gas_used += tx.gas_limit;
        packed.included.push(tx);
    }
    packed
        .rejected
        .extend(remaining.map(|tx| (tx, RejectionReason::DeltaFull)));
    packed
}
