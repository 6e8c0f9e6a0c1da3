//! Bounds-checked byte cursors used by the transaction codecs
//!
//! `ByteReader` walks a borrowed slice forward; `ByteWriter` fills a buffer
//! whose size is fixed up front. Every read or write advances the offset by
//! exactly the number of bytes it touched, and any access past the end fails
//! with `CodecError::OutOfBounds` without moving the offset.

use super::varint::{decode_varint, encode_varint};
use crate::constants::MAX_VAR_BYTES_LENGTH;
use crate::error::{CodecError, Result};
use std::borrow::Cow;

/// Forward-only reader over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::OutOfBounds {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt
    ///
    /// Truncated or non-canonical VarInts fail with `MalformedInput`.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, consumed) = decode_varint(&self.data[self.offset..])?;
        self.offset += consumed;
        Ok(value)
    }

    /// Read a VarInt length followed by that many bytes
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8]> {
        self.read_var_bytes_limited(MAX_VAR_BYTES_LENGTH)
    }

    /// Like `read_var_bytes`, rejecting declared lengths above `max_len`
    pub fn read_var_bytes_limited(&mut self, max_len: u64) -> Result<&'a [u8]> {
        let start = self.offset;
        let len = self.read_varint()?;
        if len > max_len {
            self.offset = start;
            return Err(CodecError::MalformedInput(Cow::Owned(format!(
                "length prefix {len} exceeds limit {max_len}"
            ))));
        }
        // A length that does not fit in usize can never fit in the buffer either
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.read_bytes(len).map_err(|err| {
            self.offset = start;
            err
        })
    }
}

/// Writer over a buffer allocated once at its final size
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
    offset: usize,
}

impl ByteWriter {
    /// Allocate a zero-filled buffer of exactly `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            offset: 0,
        }
    }

    /// Bytes written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left before the buffer is full
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.remaining() {
            return Err(CodecError::OutOfBounds {
                needed: bytes.len(),
                remaining: self.remaining(),
            });
        }
        self.buf[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_u16_le(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64_le(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&encode_varint(value))
    }

    /// Write a VarInt length followed by the bytes themselves
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.offset;
        self.write_varint(bytes.len() as u64)?;
        self.write_bytes(bytes).map_err(|err| {
            self.offset = start;
            err
        })
    }

    /// Hand back the buffer; it must have been filled exactly
    pub fn into_inner(self) -> Result<Vec<u8>> {
        if self.offset != self.buf.len() {
            return Err(CodecError::OutOfBounds {
                needed: self.buf.len(),
                remaining: self.offset,
            });
        }
        Ok(self.buf)
    }
}
