//! Compact-size VarInt encoding/decoding
//!
//! Every count and length field of the transaction wire format is a VarInt.
//! It uses 1, 3, 5 or 9 bytes depending on the value.
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Only the minimal form is ever produced, and only the minimal form is
//! accepted when decoding, so every decoded buffer re-encodes to itself.

use crate::error::{CodecError, Result};
use std::borrow::Cow;

/// Reasons a VarInt fails to decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarIntError {
    /// Insufficient bytes to decode VarInt
    InsufficientBytes,
    /// Value encoded with a wider prefix than necessary
    NonCanonical,
    /// Offset lies beyond the end of the buffer
    OffsetOutOfRange,
}

impl std::fmt::Display for VarIntError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarIntError::InsufficientBytes => write!(f, "Insufficient bytes to decode VarInt"),
            VarIntError::NonCanonical => write!(f, "Non-canonical VarInt encoding"),
            VarIntError::OffsetOutOfRange => write!(f, "VarInt offset out of range"),
        }
    }
}

impl std::error::Error for VarIntError {}

impl From<VarIntError> for CodecError {
    fn from(err: VarIntError) -> Self {
        CodecError::MalformedInput(Cow::Owned(err.to_string()))
    }
}

/// Number of bytes `encode_varint(value)` produces
///
/// ```
/// use blvm_witness::serialization::varint::varint_size;
///
/// assert_eq!(varint_size(0xfc), 1);
/// assert_eq!(varint_size(0xfd), 3);
/// assert_eq!(varint_size(0x10000), 5);
/// assert_eq!(varint_size(0x1_0000_0000), 9);
/// ```
#[inline]
pub fn varint_size(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value <= 0xffff {
        3
    } else if value <= 0xffff_ffff {
        5
    } else {
        9
    }
}

/// Encode a u64 value as a VarInt
///
/// # Examples
///
/// ```
/// use blvm_witness::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65535), vec![0xfd, 255, 255]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(varint_size(value));
    if value < 0xfd {
        result.push(value as u8);
    } else if value <= 0xffff {
        result.push(0xfd);
        result.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        result.push(0xfe);
        result.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        result.push(0xff);
        result.extend_from_slice(&value.to_le_bytes());
    }

    debug_assert_eq!(
        result.len(),
        varint_size(value),
        "VarInt encoding of {value} must be minimal"
    );

    result
}

/// Decode a VarInt from the start of `data`
///
/// Returns the decoded value and the number of bytes consumed.
///
/// # Errors
///
/// Returns `CodecError::MalformedInput` if the input is truncated or the
/// value is not minimally encoded.
///
/// # Examples
///
/// ```
/// use blvm_witness::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[0]), Ok((0, 1)));
/// assert_eq!(decode_varint(&[252]), Ok((252, 1)));
/// assert_eq!(decode_varint(&[0xfd, 253, 0]), Ok((253, 3)));
/// assert_eq!(decode_varint(&[0xfe, 0, 0, 1, 0]), Ok((65536, 5)));
/// assert!(decode_varint(&[]).is_err());
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let first_byte = *data.first().ok_or(VarIntError::InsufficientBytes)?;

    let (value, size, minimum) = match first_byte {
        b if b < 0xfd => return Ok((b as u64, 1)),
        0xfd => {
            let bytes = fixed::<2>(data)?;
            (u16::from_le_bytes(bytes) as u64, 3, 0xfd)
        }
        0xfe => {
            let bytes = fixed::<4>(data)?;
            (u32::from_le_bytes(bytes) as u64, 5, 0x1_0000)
        }
        _ => {
            let bytes = fixed::<8>(data)?;
            (u64::from_le_bytes(bytes), 9, 0x1_0000_0000)
        }
    };

    // Same value must not have a shorter encoding
    if value < minimum {
        return Err(VarIntError::NonCanonical.into());
    }

    Ok((value, size))
}

/// Decode a VarInt located at `offset` within `data`
///
/// ```
/// use blvm_witness::serialization::varint::decode_varint_at;
///
/// assert_eq!(decode_varint_at(&[0xaa, 0xfd, 0x00, 0x01], 1), Ok((256, 3)));
/// assert!(decode_varint_at(&[0x01], 2).is_err());
/// ```
pub fn decode_varint_at(data: &[u8], offset: usize) -> Result<(u64, usize)> {
    let tail = data.get(offset..).ok_or(VarIntError::OffsetOutOfRange)?;
    decode_varint(tail)
}

/// Read the `N` little-endian bytes following the prefix byte
fn fixed<const N: usize>(data: &[u8]) -> std::result::Result<[u8; N], VarIntError> {
    data.get(1..1 + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(VarIntError::InsufficientBytes)
}
