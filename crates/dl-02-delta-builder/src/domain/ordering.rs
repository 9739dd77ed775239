//! Salted entry ordering and the candidate digest.
//!
//! Every byte comparison here is plain unsigned lexicographic order on slices
//! (`<[u8]>::cmp`): the first differing byte decides, and a strict prefix sorts
//! before the longer sequence.

use shared_types::{sha256_concat, CoinbaseEntry, Hash, MempoolTransaction, Signature};

/// A raw entry paired with `sha256(entry ‖ salt)`, used only as a sort key.
pub struct RawEntryWithSaltedEntry {
    pub transaction: MempoolTransaction,
    pub raw_entry: Vec<u8>,
    pub salted_entry: Hash,
}

impl RawEntryWithSaltedEntry {
    pub fn new(transaction: MempoolTransaction, salt: &[u8]) -> Self {
        let raw_entry = transaction.entry.to_bytes();
        let salted_entry = sha256_concat(&[&raw_entry, salt]);
        Self {
            transaction,
            raw_entry,
            salted_entry,
        }
    }
}

/// Order transactions by the salted hash of their entry.
pub fn salted_order(transactions: Vec<MempoolTransaction>, salt: &[u8]) -> Vec<RawEntryWithSaltedEntry> {
    let mut salted: Vec<_> = transactions
        .into_iter()
        .map(|tx| RawEntryWithSaltedEntry::new(tx, salt))
        .collect();
    salted.sort_by(|a, b| {
        a.salted_entry
            .cmp(&b.salted_entry)
            .then_with(|| a.raw_entry.cmp(&b.raw_entry))
            .then_with(|| a.transaction.signature.cmp(&b.transaction.signature))
    });
    salted
}

/// Signatures in byte-lexicographic order.
pub fn sorted_signatures<'a>(transactions: impl IntoIterator<Item = &'a MempoolTransaction>) -> Vec<Signature> {
    let mut signatures: Vec<Signature> = transactions.into_iter().map(|tx| tx.signature).collect();
    signatures.sort_unstable();
    signatures
}

/// Digest of the salted entries, then the sorted signatures, then the coinbase.
pub fn candidate_hash(
    salted_entries: &[RawEntryWithSaltedEntry],
    signatures: &[Signature],
    coinbase: &CoinbaseEntry,
) -> Hash {
    let coinbase_bytes = coinbase.to_bytes();
    let parts: Vec<&[u8]> = salted_entries
        .iter()
        .map(|entry| entry.raw_entry.as_slice())
        .chain(signatures.iter().map(|signature| signature.as_slice()))
        .chain(std::iter::once(coinbase_bytes.as_slice()))
        .collect();
    sha256_concat(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{sha256, PublicEntry, PUBLIC_ENTRY_VERSION};

    fn tx(amount: u64, signature_byte: u8) -> MempoolTransaction {
        MempoolTransaction {
            entry: PublicEntry {
                sender_public_key: [3u8; 32],
                receiver_public_key: [4u8; 32],
                amount,
                data: vec![],
            },
            signature: [signature_byte; 64],
            lock_time: 0,
            version: PUBLIC_ENTRY_VERSION,
            fee: 1,
            gas_limit: 21_000,
            gas_price: 1,
            timestamp: 0,
        }
    }

    #[test]
    fn test_salted_order_ignores_input_order() {
        let salt = [1, 2, 3, 4];
        let forward = salted_order(vec![tx(1, 1), tx(2, 2), tx(3, 3)], &salt);
        let backward = salted_order(vec![tx(3, 3), tx(2, 2), tx(1, 1)], &salt);
        let f: Vec<u64> = forward.iter().map(|e| e.transaction.entry.amount).collect();
        let b: Vec<u64> = backward.iter().map(|e| e.transaction.entry.amount).collect();
        assert_eq!(f, b);
    }

    #[test]
    fn test_salted_order_sorts_by_salted_hash() {
        let salt = [9, 9, 9, 9];
        let ordered = salted_order((0..20).map(|i| tx(i, i as u8)).collect(), &salt);
        for pair in ordered.windows(2) {
            assert!(pair[0].salted_entry <= pair[1].salted_entry);
        }
        let first = &ordered[0];
        let mut expected_input = first.raw_entry.clone();
        expected_input.extend_from_slice(&salt);
        assert_eq!(first.salted_entry, sha256(&expected_input));
    }

    #[test]
    fn test_salt_changes_order() {
        let entries: Vec<_> = (0..16).map(|i| tx(i, i as u8)).collect();
        let a: Vec<u64> = salted_order(entries.clone(), &[0, 0, 0, 1])
            .iter()
            .map(|e| e.transaction.entry.amount)
            .collect();
        let b: Vec<u64> = salted_order(entries, &[0, 0, 0, 2])
            .iter()
            .map(|e| e.transaction.entry.amount)
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_signatures_sorted_bytewise() {
        let sorted = sorted_signatures(&[tx(1, 0xFF), tx(2, 0x00), tx(3, 0x7F)]);
        assert_eq!(sorted[0][0], 0x00);
        assert_eq!(sorted[1][0], 0x7F);
        assert_eq!(sorted[2][0], 0xFF);
    }

    #[test]
    fn test_candidate_hash_is_concatenation_digest() {
        let salted = salted_order(vec![tx(1, 1)], &[0, 0, 0, 0]);
        let signatures = sorted_signatures(salted.iter().map(|e| &e.transaction));
        let coinbase = CoinbaseEntry::new(1, [5u8; 32]);

        let mut joined = salted[0].raw_entry.clone();
        joined.extend_from_slice(&signatures[0]);
        joined.extend_from_slice(&coinbase.to_bytes());

        assert_eq!(candidate_hash(&salted, &signatures, &coinbase), sha256(&joined));
    }
}
