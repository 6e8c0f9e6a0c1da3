#![no_main]
use blvm_witness::serialization::transaction::{deserialize_transaction, serialize_transaction};
use blvm_witness::serialization::varint::{decode_varint, encode_varint};
use blvm_witness::serialization::witness_transaction::deserialize_witness_transaction_with_offset;
use blvm_witness::{DecodeMode, HasInputs, HasWitnesses};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Witness transaction: whatever decodes must re-encode to the consumed bytes
    if let Ok((tx, consumed)) =
        deserialize_witness_transaction_with_offset(data, DecodeMode::Lenient)
    {
        assert!(consumed <= data.len());
        assert_eq!(tx.byte_length(), consumed, "byte_length must match consumed bytes");

        match tx.to_bytes() {
            Ok(encoded) => assert_eq!(
                &encoded[..],
                &data[..consumed],
                "re-encoding must be identical"
            ),
            // Only a witness/input count mismatch may refuse to encode
            Err(_) => assert_ne!(tx.witnesses().len(), tx.inputs().len()),
        }
    }

    // Legacy transaction round trip
    if let Ok(tx) = deserialize_transaction(data, DecodeMode::Strict) {
        let serialized = serialize_transaction(&tx).expect("decoded transaction must encode");
        assert_eq!(serialized, data, "strict legacy decode must re-encode exactly");
    }

    // VarInt: decoded values are minimal
    if let Ok((value, consumed)) = decode_varint(data) {
        assert_eq!(encode_varint(value), &data[..consumed]);
    }
});
