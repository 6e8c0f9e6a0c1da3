//! Witness transaction: the base model plus one witness entry per input
//!
//! The witness variant composes a base [`Transaction`] instead of extending
//! it. Inputs added through [`WitnessTransaction::add_input`] always get a
//! witness slot, so `witnesses().len() == inputs().len()` holds for every
//! transaction built through the mutators. Only the decoder can produce a
//! mismatched transaction, and the encoder refuses to serialize one.

use crate::constants::HASH_SIZE;
use crate::error::{CodecError, Result};
use crate::segwit;
use crate::serialization::transaction::serialize_transaction;
use crate::serialization::witness_transaction::{
    deserialize_witness_transaction, serialize_witness_transaction,
    witness_transaction_byte_length,
};
use crate::transaction_hash::{calculate_tx_id, calculate_witness_hash, display_hash};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessTransaction {
    base: Transaction,
    witnesses: Vec<ByteString>,
}

impl Default for WitnessTransaction {
    fn default() -> Self {
        Self::new()
    }
}

impl WitnessTransaction {
    /// Create an empty version 1 transaction
    pub fn new() -> Self {
        Self {
            base: Transaction::new(),
            witnesses: Vec::new(),
        }
    }

    /// Assemble a transaction from decoded parts; counts are not checked
    pub(crate) fn from_parts(base: Transaction, witnesses: Vec<ByteString>) -> Self {
        Self { base, witnesses }
    }

    /// Decode from the witness wire format
    pub fn from_bytes(data: &[u8], mode: DecodeMode) -> Result<Self> {
        deserialize_witness_transaction(data, mode)
    }

    /// The base transaction this witness transaction is built on
    pub fn base(&self) -> &Transaction {
        &self.base
    }

    pub fn version(&self) -> u32 {
        self.base.version
    }

    pub fn set_version(&mut self, version: u32) {
        self.base.version = version;
    }

    pub fn lock_time(&self) -> u32 {
        self.base.lock_time
    }

    pub fn set_lock_time(&mut self, lock_time: u32) {
        self.base.lock_time = lock_time;
    }

    /// Append an input with an empty script and return its index
    ///
    /// `hash` must be exactly 32 bytes. A missing `sequence` becomes
    /// [`crate::constants::DEFAULT_SEQUENCE`] and a missing `witness` an
    /// empty byte string.
    pub fn add_input(
        &mut self,
        hash: &[u8],
        index: u32,
        sequence: Option<u32>,
        witness: Option<ByteString>,
    ) -> Result<usize> {
        let hash: Hash = hash.try_into().map_err(|_| {
            CodecError::InvalidArgument(Cow::Owned(format!(
                "input hash must be {HASH_SIZE} bytes, got {}",
                hash.len()
            )))
        })?;

        let vin = self.base.add_input(hash, index, sequence, Vec::new());
        self.witnesses.push(witness.unwrap_or_default());
        debug_assert_eq!(self.witnesses.len(), self.base.inputs.len());
        Ok(vin)
    }

    /// Append an output and return its index
    pub fn add_output(&mut self, script: ByteString, value: u64) -> usize {
        self.base.add_output(script, value)
    }

    /// Not supported: witness inputs carry their unlocking data in the
    /// witness, use [`WitnessTransaction::set_witness`]
    pub fn set_input_script(&mut self, _index: usize, _script: ByteString) -> Result<()> {
        Err(CodecError::UnsupportedOperation(Cow::Borrowed(
            "set_input_script not supported for witness transactions",
        )))
    }

    /// Replace the witness of input `index`
    pub fn set_witness(&mut self, index: usize, witness: ByteString) -> Result<()> {
        let len = self.witnesses.len();
        let slot = self.witnesses.get_mut(index).ok_or_else(|| {
            CodecError::InvalidArgument(Cow::Owned(format!(
                "witness index {index} out of range for {len} witnesses"
            )))
        })?;
        *slot = witness;
        Ok(())
    }

    /// Exact length of the witness serialization
    pub fn byte_length(&self) -> usize {
        witness_transaction_byte_length(self)
    }

    /// Serialize to the witness wire format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize_witness_transaction(self)
    }

    /// Serialize the base transaction, witness data excluded
    pub fn to_base_bytes(&self) -> Result<Vec<u8>> {
        serialize_transaction(&self.base)
    }

    /// Double SHA-256 of the witness serialization, wire order
    pub fn get_witness_hash(&self) -> Result<Hash> {
        calculate_witness_hash(self)
    }

    /// Witness identifier in display (byte-reversed) hex
    pub fn get_witness_id(&self) -> Result<String> {
        Ok(display_hash(&self.get_witness_hash()?))
    }

    /// Double SHA-256 of the base serialization, wire order
    pub fn get_hash(&self) -> Result<Hash> {
        calculate_tx_id(&self.base)
    }

    /// Legacy identifier in display (byte-reversed) hex
    pub fn get_id(&self) -> Result<String> {
        Ok(display_hash(&self.get_hash()?))
    }

    /// Weight units: base size × 3 + total size
    pub fn weight(&self) -> usize {
        segwit::calculate_transaction_weight(self)
    }

    /// Weight divided by four, rounded up
    pub fn virtual_size(&self) -> usize {
        segwit::calculate_virtual_size(self)
    }
}

impl HasInputs for WitnessTransaction {
    fn inputs(&self) -> &[TransactionInput] {
        &self.base.inputs
    }
}

impl HasOutputs for WitnessTransaction {
    fn outputs(&self) -> &[TransactionOutput] {
        &self.base.outputs
    }
}

impl HasWitnesses for WitnessTransaction {
    fn witnesses(&self) -> &[ByteString] {
        &self.witnesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SEQUENCE;

    #[test]
    fn test_add_input_keeps_witnesses_aligned() {
        let mut tx = WitnessTransaction::new();
        for i in 0..4u32 {
            let witness = (i % 2 == 0).then(|| vec![i as u8; 3]);
            let vin = tx.add_input(&[i as u8; 32], i, None, witness).unwrap();
            assert_eq!(vin, i as usize);
            assert_eq!(tx.witnesses().len(), tx.inputs().len());
        }
        assert_eq!(tx.witnesses()[0], vec![0, 0, 0]);
        assert!(tx.witnesses()[1].is_empty());
        assert!(tx.inputs().iter().all(|input| input.script.is_empty()));
        assert!(tx.inputs().iter().all(|input| input.sequence == DEFAULT_SEQUENCE));
    }

    #[test]
    fn test_add_input_rejects_wrong_hash_length() {
        let mut tx = WitnessTransaction::new();
        for len in [0, 31, 33] {
            let hash = vec![0u8; len];
            assert!(matches!(
                tx.add_input(&hash, 0, None, None),
                Err(CodecError::InvalidArgument(_))
            ));
        }
        assert!(tx.inputs().is_empty());
        assert!(tx.witnesses().is_empty());
    }

    #[test]
    fn test_set_input_script_is_unsupported() {
        let mut empty = WitnessTransaction::new();
        assert!(matches!(
            empty.set_input_script(0, vec![0x51]),
            Err(CodecError::UnsupportedOperation(_))
        ));

        let mut tx = WitnessTransaction::new();
        tx.add_input(&[7; 32], 1, Some(5), None).unwrap();
        assert!(matches!(
            tx.set_input_script(0, vec![]),
            Err(CodecError::UnsupportedOperation(_))
        ));
        assert!(tx.inputs()[0].script.is_empty());
    }

    #[test]
    fn test_set_witness() {
        let mut tx = WitnessTransaction::new();
        tx.add_input(&[7; 32], 1, None, None).unwrap();
        tx.set_witness(0, vec![0x30, 0x44]).unwrap();
        assert_eq!(tx.witnesses()[0], vec![0x30, 0x44]);

        assert!(matches!(
            tx.set_witness(1, vec![0x01]),
            Err(CodecError::InvalidArgument(_))
        ));
        assert_eq!(tx.witnesses().len(), 1);
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let mut tx = WitnessTransaction::new();
        tx.set_version(2);
        tx.set_lock_time(500_000);
        tx.add_input(&[0xab; 32], 3, Some(0xfffffffd), Some(vec![0x01; 72]))
            .unwrap();
        tx.add_input(&[0xcd; 32], 0, None, None).unwrap();
        tx.add_output(vec![0x00, 0x14, 0x11], 12_345);
        tx.add_output(vec![], u64::MAX);

        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), tx.byte_length());
        assert_eq!(WitnessTransaction::from_bytes(&bytes, DecodeMode::Strict).unwrap(), tx);
    }

    #[test]
    fn test_legacy_id_ignores_witness() {
        let mut tx = WitnessTransaction::new();
        tx.add_input(&[1; 32], 0, None, None).unwrap();
        tx.add_output(vec![0x51], 1000);
        let id_before = tx.get_id().unwrap();
        let wid_before = tx.get_witness_id().unwrap();

        tx.set_witness(0, vec![0xde, 0xad]).unwrap();
        assert_eq!(tx.get_id().unwrap(), id_before);
        assert_ne!(tx.get_witness_id().unwrap(), wid_before);
    }
}
