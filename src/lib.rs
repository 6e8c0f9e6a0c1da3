//! # blvm-witness
//!
//! Codec for the witness-extended transaction wire format.
//!
//! The crate decodes and encodes transactions whose legacy serialization is
//! extended with a `0x00 0x01` marker/flag preamble and a per-input witness
//! section, computes their exact serialized length, and derives their
//! identity hashes. It performs no script interpretation and no validation
//! beyond the shape of the wire format.
//!
//! ## Usage
//!
//! ```rust
//! use blvm_witness::{DecodeMode, HasInputs, HasWitnesses, WitnessTransaction};
//!
//! let mut tx = WitnessTransaction::new();
//! tx.add_input(&[0u8; 32], 0xffff_ffff, None, None).unwrap();
//! tx.add_output(vec![], 0);
//!
//! let bytes = tx.to_bytes().unwrap();
//! assert_eq!(bytes.len(), 64);
//! assert_eq!(bytes.len(), tx.byte_length());
//!
//! let decoded = WitnessTransaction::from_bytes(&bytes, DecodeMode::Strict).unwrap();
//! assert_eq!(decoded, tx);
//! assert_eq!(decoded.witnesses().len(), decoded.inputs().len());
//! ```

pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod segwit;
pub mod serialization;
pub mod transaction_hash;
pub mod types;
pub mod witness_transaction;

pub use config::{CodecConfig, DecodeConfig, DecodeLimits};
pub use error::{CodecError, Result};
pub use types::{
    ByteString, DecodeMode, Hash, HasInputs, HasOutputs, HasWitnesses, Transaction,
    TransactionInput, TransactionOutput,
};
pub use witness_transaction::WitnessTransaction;
