//! Witness transaction wire format serialization/deserialization
//!
//! The witness format inserts a two-byte preamble (marker `0x00`, flag
//! `0x01`) after the version and a witness section before the lock time:
//!
//! | Field          | Encoding                  |
//! |----------------|---------------------------|
//! | version        | 4 bytes LE                |
//! | marker         | 1 byte, `0x00`            |
//! | flag           | 1 byte, `0x01`            |
//! | inputs         | VarInt count + inputs     |
//! | outputs        | VarInt count + outputs    |
//! | witnesses      | VarInt count + var-bytes  |
//! | lock time      | 4 bytes LE                |
//!
//! The marker and flag are single bytes, not a 32-bit field.

use super::cursor::{ByteReader, ByteWriter};
use super::transaction::{
    checked_count, finish, inputs_size, outputs_size, read_inputs, read_outputs, var_bytes_size,
    write_inputs, write_outputs,
};
use super::varint::varint_size;
use crate::config::{get_codec_config, CodecConfig};
use crate::constants::{
    MIN_WITNESS_SIZE, TX_FIXED_SIZE, WITNESS_FLAG, WITNESS_MARKER, WITNESS_PREAMBLE_SIZE,
};
use crate::error::{CodecError, Result};
use crate::types::*;
use crate::witness_transaction::WitnessTransaction;
use std::borrow::Cow;

/// Encoded size of the witness section, count prefix included
pub(crate) fn witnesses_size<T: HasWitnesses + ?Sized>(tx: &T) -> usize {
    varint_size(tx.witnesses().len() as u64)
        + tx.witnesses()
            .iter()
            .map(|witness| var_bytes_size(witness))
            .sum::<usize>()
}

/// Exact length of `serialize_witness_transaction(tx)`, computed without serializing
pub fn witness_transaction_byte_length(tx: &WitnessTransaction) -> usize {
    TX_FIXED_SIZE + WITNESS_PREAMBLE_SIZE + inputs_size(tx) + outputs_size(tx) + witnesses_size(tx)
}

/// Serialize a transaction to the witness wire format
///
/// The buffer is allocated once at `witness_transaction_byte_length(tx)`
/// bytes and must be filled exactly.
///
/// # Errors
///
/// `WitnessCountMismatch` if the transaction does not carry exactly one
/// witness entry per input.
pub fn serialize_witness_transaction(tx: &WitnessTransaction) -> Result<Vec<u8>> {
    let (inputs, witnesses) = (tx.inputs().len(), tx.witnesses().len());
    if inputs != witnesses {
        return Err(CodecError::WitnessCountMismatch { inputs, witnesses });
    }

    let mut writer = ByteWriter::with_capacity(witness_transaction_byte_length(tx));
    writer.write_u32_le(tx.version())?;
    writer.write_u8(WITNESS_MARKER)?;
    writer.write_u8(WITNESS_FLAG)?;
    write_inputs(&mut writer, tx.inputs())?;
    write_outputs(&mut writer, tx.outputs())?;
    writer.write_varint(witnesses as u64)?;
    for witness in tx.witnesses() {
        writer.write_var_bytes(witness)?;
    }
    writer.write_u32_le(tx.lock_time())?;

    let bytes = writer.into_inner()?;
    tracing::trace!(len = bytes.len(), inputs, "serialized witness transaction");
    Ok(bytes)
}

/// Deserialize a transaction from the witness wire format
///
/// A buffer without the `0x00 0x01` preamble (for instance a legacy
/// transaction) fails with `UnsupportedEncoding`; decode it with
/// [`super::transaction::deserialize_transaction`] instead.
pub fn deserialize_witness_transaction(
    data: &[u8],
    mode: DecodeMode,
) -> Result<WitnessTransaction> {
    deserialize_witness_transaction_with_config(data, mode, get_codec_config())
        .map(|(tx, _consumed)| tx)
}

/// Deserialize a witness transaction, returning it with the bytes consumed
pub fn deserialize_witness_transaction_with_offset(
    data: &[u8],
    mode: DecodeMode,
) -> Result<(WitnessTransaction, usize)> {
    deserialize_witness_transaction_with_config(data, mode, get_codec_config())
}

/// Deserialize a witness transaction under an explicit configuration
pub fn deserialize_witness_transaction_with_config(
    data: &[u8],
    mode: DecodeMode,
    config: &CodecConfig,
) -> Result<(WitnessTransaction, usize)> {
    let mut reader = ByteReader::new(data);

    let version = reader.read_u32_le()?;

    let marker = reader.read_u8()?;
    if marker != WITNESS_MARKER {
        return Err(CodecError::UnsupportedEncoding(Cow::Owned(format!(
            "not a witness-encoded transaction (marker 0x{marker:02x})"
        ))));
    }
    let flag = reader.read_u8()?;
    if flag != WITNESS_FLAG {
        return Err(CodecError::UnsupportedEncoding(Cow::Owned(format!(
            "unsupported witness flag 0x{flag:02x}"
        ))));
    }

    let inputs = read_inputs(&mut reader, config)?;
    let outputs = read_outputs(&mut reader, config)?;
    let witnesses = read_witnesses(&mut reader, config)?;

    if witnesses.len() != inputs.len() {
        if config.decode.reject_witness_count_mismatch {
            return Err(CodecError::WitnessCountMismatch {
                inputs: inputs.len(),
                witnesses: witnesses.len(),
            });
        }
        tracing::warn!(
            inputs = inputs.len(),
            witnesses = witnesses.len(),
            "witness count differs from input count"
        );
    }

    let lock_time = reader.read_u32_le()?;
    let consumed = finish(&reader, mode)?;

    tracing::debug!(
        inputs = inputs.len(),
        outputs = outputs.len(),
        consumed,
        "decoded witness transaction"
    );

    let base = Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    };
    Ok((WitnessTransaction::from_parts(base, witnesses), consumed))
}

fn read_witnesses(reader: &mut ByteReader<'_>, config: &CodecConfig) -> Result<Vec<ByteString>> {
    let count = reader.read_varint()?;
    let (count, capacity) = checked_count(
        reader,
        count,
        config.limits.max_witnesses,
        MIN_WITNESS_SIZE,
        "witness",
    )?;

    let mut witnesses = Vec::with_capacity(capacity);
    for _ in 0..count {
        witnesses.push(
            reader
                .read_var_bytes_limited(config.limits.max_var_bytes_length)?
                .to_vec(),
        );
    }
    Ok(witnesses)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// version=1, one input (zero hash, index and sequence 0xffffffff, empty
    /// script), one zero-value output with empty script, one empty witness,
    /// lock time 0
    fn minimal_bytes() -> Vec<u8> {
        let mut bytes = vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01];
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.extend_from_slice(&[0xff; 4]);
        bytes.push(0x00);
        bytes.extend_from_slice(&[0xff; 4]);
        bytes.push(0x01);
        bytes.extend_from_slice(&[0u8; 8]);
        bytes.push(0x00);
        bytes.push(0x01);
        bytes.push(0x00);
        bytes.extend_from_slice(&[0u8; 4]);
        bytes
    }

    fn minimal_transaction() -> WitnessTransaction {
        let mut tx = WitnessTransaction::new();
        tx.add_input(&[0u8; 32], 0xffffffff, None, None).unwrap();
        tx.add_output(vec![], 0);
        tx
    }

    #[test]
    fn test_minimal_transaction_is_64_bytes() {
        let tx = minimal_transaction();
        assert_eq!(witness_transaction_byte_length(&tx), 64);

        let encoded = serialize_witness_transaction(&tx).unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded, minimal_bytes());
    }

    #[test]
    fn test_minimal_transaction_decodes_strict() {
        let (tx, consumed) =
            deserialize_witness_transaction_with_offset(&minimal_bytes(), DecodeMode::Strict)
                .unwrap();
        assert_eq!(consumed, 64);
        assert_eq!(tx, minimal_transaction());
        assert_eq!(tx.inputs()[0].sequence, 0xffffffff);
        assert_eq!(tx.witnesses(), &[Vec::<u8>::new()]);
    }

    #[test]
    fn test_marker_and_flag_rejected() {
        let mut bad_marker = minimal_bytes();
        bad_marker[4] = 0x01;
        assert!(matches!(
            deserialize_witness_transaction(&bad_marker, DecodeMode::Strict),
            Err(CodecError::UnsupportedEncoding(_))
        ));

        let mut bad_flag = minimal_bytes();
        bad_flag[5] = 0x02;
        assert!(matches!(
            deserialize_witness_transaction(&bad_flag, DecodeMode::Strict),
            Err(CodecError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_truncated_buffer_fails_at_every_length() {
        let bytes = minimal_bytes();
        for len in 0..bytes.len() {
            assert!(
                deserialize_witness_transaction(&bytes[..len], DecodeMode::Lenient).is_err(),
                "prefix of length {len} must not decode"
            );
        }
    }

    #[test]
    fn test_witness_count_mismatch_policy() {
        // Same transaction with zero witnesses
        let mut bytes = minimal_bytes();
        let witness_section = bytes.len() - 6;
        bytes.splice(witness_section..witness_section + 2, [0x00]);

        let lenient = CodecConfig::default();
        let (tx, _) =
            deserialize_witness_transaction_with_config(&bytes, DecodeMode::Strict, &lenient)
                .unwrap();
        assert_eq!(tx.inputs().len(), 1);
        assert!(tx.witnesses().is_empty());
        assert_eq!(
            serialize_witness_transaction(&tx),
            Err(CodecError::WitnessCountMismatch {
                inputs: 1,
                witnesses: 0
            })
        );

        let mut strict = CodecConfig::default();
        strict.decode.reject_witness_count_mismatch = true;
        assert_eq!(
            deserialize_witness_transaction_with_config(&bytes, DecodeMode::Strict, &strict)
                .map(|_| ()),
            Err(CodecError::WitnessCountMismatch {
                inputs: 1,
                witnesses: 0
            })
        );
    }
}
