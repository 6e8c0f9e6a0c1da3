//! Witness size metrics
//!
//! Weight(tx) = 3 × |Serialize(tx ∖ witness)| + |Serialize(tx)|
//!
//! which equals 4 × base size + witness overhead: the base serialization is
//! charged four weight units per byte, the marker, flag and witness section
//! one unit per byte.

use crate::constants::WITNESS_SCALE_FACTOR;
use crate::serialization::transaction::transaction_byte_length;
use crate::witness_transaction::WitnessTransaction;

/// Size of the base serialization (without marker, flag and witnesses)
pub fn calculate_base_size(tx: &WitnessTransaction) -> usize {
    transaction_byte_length(tx.base())
}

/// Size of the full witness serialization
pub fn calculate_total_size(tx: &WitnessTransaction) -> usize {
    tx.byte_length()
}

/// Transaction weight in weight units
pub fn calculate_transaction_weight(tx: &WitnessTransaction) -> usize {
    calculate_base_size(tx) * (WITNESS_SCALE_FACTOR - 1) + calculate_total_size(tx)
}

/// Virtual size: weight / 4 rounded up
pub fn calculate_virtual_size(tx: &WitnessTransaction) -> usize {
    calculate_transaction_weight(tx).div_ceil(WITNESS_SCALE_FACTOR)
}
