//! Base transaction model shared by the legacy and witness codecs

use crate::constants::DEFAULT_SEQUENCE;
use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash, stored in wire byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Hash of the transaction being spent (wire order)
    pub hash: Hash,
    /// Output index within that transaction
    pub index: u32,
    /// Unlocking script
    pub script: ByteString,
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    /// Locking script
    pub script: ByteString,
}

/// Base (non-witness) transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create an empty version 1 transaction
    pub fn new() -> Self {
        Self {
            version: 1,
            ..Self::default()
        }
    }

    /// Append an input and return its index
    ///
    /// A missing `sequence` becomes [`DEFAULT_SEQUENCE`].
    pub fn add_input(
        &mut self,
        hash: Hash,
        index: u32,
        sequence: Option<u32>,
        script: ByteString,
    ) -> usize {
        self.inputs.push(TransactionInput {
            hash,
            index,
            script,
            sequence: sequence.unwrap_or(DEFAULT_SEQUENCE),
        });
        self.inputs.len() - 1
    }

    /// Append an output and return its index
    pub fn add_output(&mut self, script: ByteString, value: u64) -> usize {
        self.outputs.push(TransactionOutput { value, script });
        self.outputs.len() - 1
    }
}

/// Access to the ordered inputs of a transaction
pub trait HasInputs {
    fn inputs(&self) -> &[TransactionInput];
}

/// Access to the ordered outputs of a transaction
pub trait HasOutputs {
    fn outputs(&self) -> &[TransactionOutput];
}

/// Access to the per-input witness entries of a transaction
pub trait HasWitnesses {
    fn witnesses(&self) -> &[ByteString];
}

impl HasInputs for Transaction {
    fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }
}

impl HasOutputs for Transaction {
    fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }
}

/// How the decoder treats bytes left over after the lock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodeMode {
    /// The whole buffer must be consumed
    #[default]
    Strict,
    /// Leftover bytes are permitted and reported to the caller
    Lenient,
}
