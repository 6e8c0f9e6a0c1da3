//! Transaction identity hashes
//!
//! Two identifiers exist for a witness transaction:
//! - the legacy hash, over the base serialization (no marker, flag or witnesses)
//! - the witness hash, over the full witness serialization
//!
//! Both are double SHA-256 digests kept in wire byte order. Identifiers are
//! conventionally displayed with the bytes reversed.

use crate::crypto::hash256;
use crate::error::Result;
use crate::serialization::transaction::serialize_transaction;
use crate::serialization::witness_transaction::serialize_witness_transaction;
use crate::types::*;
use crate::witness_transaction::WitnessTransaction;

/// Legacy transaction hash: SHA256(SHA256(base serialization))
pub fn calculate_tx_id(tx: &Transaction) -> Result<Hash> {
    let serialized = serialize_transaction(tx)?;
    Ok(hash256(&serialized))
}

/// Witness transaction hash: SHA256(SHA256(witness serialization))
pub fn calculate_witness_hash(tx: &WitnessTransaction) -> Result<Hash> {
    let serialized = serialize_witness_transaction(tx)?;
    Ok(hash256(&serialized))
}

/// Render a hash in display order (byte-reversed lowercase hex)
pub fn display_hash(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hash_reverses_bytes() {
        let mut hash = [0u8; 32];
        hash[0] = 0x01;
        hash[31] = 0xff;
        let shown = display_hash(&hash);
        assert!(shown.starts_with("ff"));
        assert!(shown.ends_with("01"));
        assert_eq!(shown.len(), 64);
    }

    #[test]
    fn test_witness_hash_covers_full_encoding() {
        let mut tx = WitnessTransaction::new();
        tx.add_input(&[0u8; 32], 0, None, Some(vec![0x01])).unwrap();
        tx.add_output(vec![0x51], 50);

        let encoded = serialize_witness_transaction(&tx).unwrap();
        assert_eq!(calculate_witness_hash(&tx).unwrap(), hash256(&encoded));
        assert_ne!(
            calculate_witness_hash(&tx).unwrap(),
            calculate_tx_id(tx.base()).unwrap()
        );
    }

    #[test]
    fn test_mismatched_transaction_has_no_witness_hash() {
        let tx = WitnessTransaction::from_parts(
            Transaction {
                version: 1,
                inputs: vec![],
                outputs: vec![],
                lock_time: 0,
            },
            vec![vec![0x01]],
        );
        assert!(calculate_witness_hash(&tx).is_err());
        // The legacy hash does not look at witnesses
        assert!(calculate_tx_id(tx.base()).is_ok());
    }
}
