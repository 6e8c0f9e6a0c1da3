//! Transaction wire format serialization/deserialization
//!
//! Byte-exact legacy and witness transaction formats. All multi-byte
//! integers are little-endian; all counts and lengths are VarInts.

pub mod cursor;
pub mod transaction;
pub mod varint;
pub mod witness_transaction;

pub use cursor::{ByteReader, ByteWriter};
pub use transaction::{
    deserialize_transaction, deserialize_transaction_with_offset, serialize_transaction,
    transaction_byte_length,
};
pub use varint::{decode_varint, decode_varint_at, encode_varint, varint_size, VarIntError};
pub use witness_transaction::{
    deserialize_witness_transaction, deserialize_witness_transaction_with_config,
    deserialize_witness_transaction_with_offset, serialize_witness_transaction,
    witness_transaction_byte_length,
};
