//! Wire format constants shared by the base model and the witness codec

/// Sequence assigned to an input when the caller does not supply one
pub const DEFAULT_SEQUENCE: u32 = 0xffff_ffff;

/// First byte after the version in a witness-encoded transaction
pub const WITNESS_MARKER: u8 = 0x00;

/// Second byte after the version in a witness-encoded transaction.
/// Other flag values are reserved.
pub const WITNESS_FLAG: u8 = 0x01;

/// Size of a transaction hash on the wire
pub const HASH_SIZE: usize = 32;

/// Version (4 bytes) + lock time (4 bytes)
pub const TX_FIXED_SIZE: usize = 8;

/// Marker byte + flag byte
pub const WITNESS_PREAMBLE_SIZE: usize = 2;

/// Fixed part of an input: hash (32) + index (4) + sequence (4)
pub const INPUT_FIXED_SIZE: usize = HASH_SIZE + 4 + 4;

/// Fixed part of an output: value (8)
pub const OUTPUT_FIXED_SIZE: usize = 8;

/// Smallest possible encoded input: fixed part + one-byte empty script length
pub const MIN_INPUT_SIZE: usize = INPUT_FIXED_SIZE + 1;

/// Smallest possible encoded output: value + one-byte empty script length
pub const MIN_OUTPUT_SIZE: usize = OUTPUT_FIXED_SIZE + 1;

/// Smallest possible encoded witness: one-byte zero length
pub const MIN_WITNESS_SIZE: usize = 1;

/// Default upper bound on inputs accepted by the decoder
pub const MAX_INPUTS: u64 = 1_000_000;

/// Default upper bound on outputs accepted by the decoder
pub const MAX_OUTPUTS: u64 = 1_000_000;

/// Default upper bound on any single length-prefixed field (32 MiB)
pub const MAX_VAR_BYTES_LENGTH: u64 = 0x0200_0000;

/// Witness weight discount factor
pub const WITNESS_SCALE_FACTOR: usize = 4;
