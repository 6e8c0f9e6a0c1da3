//! Legacy (base) transaction wire format serialization/deserialization
//!
//! The base format carries no witness data and is what the legacy
//! transaction identifier is computed over. The input and output sections
//! are shared with the witness format, so their readers, writers and size
//! functions live here and are reused by `witness_transaction`.

use super::cursor::{ByteReader, ByteWriter};
use super::varint::varint_size;
use crate::config::{get_codec_config, CodecConfig};
use crate::constants::{
    INPUT_FIXED_SIZE, MIN_INPUT_SIZE, MIN_OUTPUT_SIZE, OUTPUT_FIXED_SIZE, TX_FIXED_SIZE,
};
use crate::error::{CodecError, Result};
use crate::types::*;
use std::borrow::Cow;

/// Encoded size of a length-prefixed byte string
#[inline]
pub(crate) fn var_bytes_size(bytes: &[u8]) -> usize {
    varint_size(bytes.len() as u64) + bytes.len()
}

/// Encoded size of the input section, count prefix included
pub(crate) fn inputs_size<T: HasInputs + ?Sized>(tx: &T) -> usize {
    varint_size(tx.inputs().len() as u64)
        + tx.inputs()
            .iter()
            .map(|input| INPUT_FIXED_SIZE + var_bytes_size(&input.script))
            .sum::<usize>()
}

/// Encoded size of the output section, count prefix included
pub(crate) fn outputs_size<T: HasOutputs + ?Sized>(tx: &T) -> usize {
    varint_size(tx.outputs().len() as u64)
        + tx.outputs()
            .iter()
            .map(|output| OUTPUT_FIXED_SIZE + var_bytes_size(&output.script))
            .sum::<usize>()
}

/// Exact length of `serialize_transaction(tx)`
pub fn transaction_byte_length(tx: &Transaction) -> usize {
    TX_FIXED_SIZE + inputs_size(tx) + outputs_size(tx)
}

/// Check a decoded count against its limit and size the allocation for it
///
/// The capacity never exceeds what the remaining bytes could possibly hold.
pub(crate) fn checked_count(
    reader: &ByteReader<'_>,
    count: u64,
    limit: u64,
    min_item_size: usize,
    what: &'static str,
) -> Result<(usize, usize)> {
    if count > limit {
        return Err(CodecError::MalformedInput(Cow::Owned(format!(
            "{what} count {count} exceeds limit {limit}"
        ))));
    }
    let count = usize::try_from(count).map_err(|_| {
        CodecError::MalformedInput(Cow::Owned(format!("{what} count {count} overflows usize")))
    })?;
    let capacity = count.min(reader.remaining() / min_item_size);
    Ok((count, capacity))
}

pub(crate) fn read_inputs(
    reader: &mut ByteReader<'_>,
    config: &CodecConfig,
) -> Result<Vec<TransactionInput>> {
    let count = reader.read_varint()?;
    let (count, capacity) = checked_count(
        reader,
        count,
        config.limits.max_inputs,
        MIN_INPUT_SIZE,
        "input",
    )?;

    let mut inputs = Vec::with_capacity(capacity);
    for _ in 0..count {
        let hash = reader.read_array::<32>()?;
        let index = reader.read_u32_le()?;
        let script = reader
            .read_var_bytes_limited(config.limits.max_var_bytes_length)?
            .to_vec();
        let sequence = reader.read_u32_le()?;
        inputs.push(TransactionInput {
            hash,
            index,
            script,
            sequence,
        });
    }
    Ok(inputs)
}

pub(crate) fn read_outputs(
    reader: &mut ByteReader<'_>,
    config: &CodecConfig,
) -> Result<Vec<TransactionOutput>> {
    let count = reader.read_varint()?;
    let (count, capacity) = checked_count(
        reader,
        count,
        config.limits.max_outputs,
        MIN_OUTPUT_SIZE,
        "output",
    )?;

    let mut outputs = Vec::with_capacity(capacity);
    for _ in 0..count {
        let value = reader.read_u64_le()?;
        let script = reader
            .read_var_bytes_limited(config.limits.max_var_bytes_length)?
            .to_vec();
        outputs.push(TransactionOutput { value, script });
    }
    Ok(outputs)
}

pub(crate) fn write_inputs(writer: &mut ByteWriter, inputs: &[TransactionInput]) -> Result<()> {
    writer.write_varint(inputs.len() as u64)?;
    for input in inputs {
        writer.write_bytes(&input.hash)?;
        writer.write_u32_le(input.index)?;
        writer.write_var_bytes(&input.script)?;
        writer.write_u32_le(input.sequence)?;
    }
    Ok(())
}

pub(crate) fn write_outputs(writer: &mut ByteWriter, outputs: &[TransactionOutput]) -> Result<()> {
    writer.write_varint(outputs.len() as u64)?;
    for output in outputs {
        writer.write_u64_le(output.value)?;
        writer.write_var_bytes(&output.script)?;
    }
    Ok(())
}

/// Serialize a transaction to the legacy wire format
///
/// Format:
/// - Version (4 bytes, little-endian)
/// - Input count (VarInt)
/// - For each input:
///   - Previous output hash (32 bytes)
///   - Previous output index (4 bytes, little-endian)
///   - Script length (VarInt)
///   - Script bytes
///   - Sequence (4 bytes, little-endian)
/// - Output count (VarInt)
/// - For each output:
///   - Value (8 bytes, little-endian)
///   - Script length (VarInt)
///   - Script bytes
/// - Lock time (4 bytes, little-endian)
pub fn serialize_transaction(tx: &Transaction) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(transaction_byte_length(tx));
    writer.write_u32_le(tx.version)?;
    write_inputs(&mut writer, &tx.inputs)?;
    write_outputs(&mut writer, &tx.outputs)?;
    writer.write_u32_le(tx.lock_time)?;
    writer.into_inner()
}

/// Deserialize a transaction from the legacy wire format
pub fn deserialize_transaction(data: &[u8], mode: DecodeMode) -> Result<Transaction> {
    deserialize_transaction_with_config(data, mode, get_codec_config())
        .map(|(tx, _consumed)| tx)
}

/// Deserialize a legacy transaction, returning it with the bytes consumed
pub fn deserialize_transaction_with_offset(
    data: &[u8],
    mode: DecodeMode,
) -> Result<(Transaction, usize)> {
    deserialize_transaction_with_config(data, mode, get_codec_config())
}

/// Deserialize a legacy transaction under an explicit configuration
pub fn deserialize_transaction_with_config(
    data: &[u8],
    mode: DecodeMode,
    config: &CodecConfig,
) -> Result<(Transaction, usize)> {
    let mut reader = ByteReader::new(data);

    let version = reader.read_u32_le()?;
    let inputs = read_inputs(&mut reader, config)?;
    let outputs = read_outputs(&mut reader, config)?;
    let lock_time = reader.read_u32_le()?;

    let consumed = finish(&reader, mode)?;
    Ok((
        Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        },
        consumed,
    ))
}

/// Apply the decode mode to whatever is left in the reader
pub(crate) fn finish(reader: &ByteReader<'_>, mode: DecodeMode) -> Result<usize> {
    let remaining = reader.remaining();
    if remaining > 0 {
        match mode {
            DecodeMode::Strict => return Err(CodecError::TrailingData { remaining }),
            DecodeMode::Lenient => {
                tracing::debug!(
                    consumed = reader.position(),
                    remaining,
                    "leaving trailing bytes after transaction"
                );
            }
        }
    }
    Ok(reader.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                hash: [1; 32],
                index: 0,
                script: vec![0x51], // OP_1
                sequence: 0xffffffff,
            }],
            outputs: vec![TransactionOutput {
                value: 5000000000,
                script: vec![0x51], // OP_1
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_serialize_deserialize_round_trip() {
        let tx = sample_transaction();
        let serialized = serialize_transaction(&tx).unwrap();
        assert_eq!(serialized.len(), transaction_byte_length(&tx));

        let deserialized = deserialize_transaction(&serialized, DecodeMode::Strict).unwrap();
        assert_eq!(deserialized, tx);
    }

    #[test]
    fn test_serialized_layout() {
        let serialized = serialize_transaction(&sample_transaction()).unwrap();
        // version
        assert_eq!(&serialized[0..4], &[1, 0, 0, 0]);
        // one input, hash follows immediately (no witness preamble)
        assert_eq!(serialized[4], 1);
        assert_eq!(&serialized[5..37], &[1; 32]);
        // lock time
        assert_eq!(&serialized[serialized.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_deserialize_insufficient_bytes() {
        assert!(deserialize_transaction(&[], DecodeMode::Strict).is_err());
        assert!(deserialize_transaction(&[0, 0, 0, 0], DecodeMode::Strict).is_err());
        assert!(deserialize_transaction(&[0, 0, 0, 0, 1], DecodeMode::Strict).is_err());
    }

    #[test]
    fn test_trailing_bytes_by_mode() {
        let mut serialized = serialize_transaction(&sample_transaction()).unwrap();
        let len = serialized.len();
        serialized.push(0x00);

        assert_eq!(
            deserialize_transaction(&serialized, DecodeMode::Strict),
            Err(CodecError::TrailingData { remaining: 1 })
        );
        let (tx, consumed) =
            deserialize_transaction_with_offset(&serialized, DecodeMode::Lenient).unwrap();
        assert_eq!(tx, sample_transaction());
        assert_eq!(consumed, len);
    }

    #[test]
    fn test_count_limit_rejected_before_allocation() {
        let mut config = CodecConfig::default();
        config.limits.max_inputs = 2;

        // version, input count 3
        let data = [1, 0, 0, 0, 3];
        assert!(matches!(
            deserialize_transaction_with_config(&data, DecodeMode::Strict, &config),
            Err(CodecError::MalformedInput(_))
        ));
    }
}
