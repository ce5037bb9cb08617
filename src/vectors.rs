//! Fixed-vector validation: known-correct signature hashes from a JSON file
//!
//! Each fixture row is either a one-element comment (skipped) or
//! `[rawTxHex, rawScriptHex, inputIndex, hashType, expectedDigestHex]`.
//! Malformed rows and structurally invalid transactions are authoring
//! errors, reported with the offending row attached; they never abort the
//! rest of the suite (the harness accumulates failures per row).

use crate::error::{ConsensusError, Result};
use crate::script::Script;
use crate::serialize::{deserialize_transaction, digest_to_hex, serialize_transaction};
use crate::sighash::signature_hash;
use crate::transaction::check_transaction;
use crate::types::*;
use serde_json::Value;

/// One decoded fixture row
#[derive(Debug, Clone)]
pub struct SighashVector {
    pub raw_tx: ByteString,
    pub raw_script: ByteString,
    pub input_index: usize,
    pub hash_type: i32,
    pub expected_digest_hex: String,
}

fn malformed(row: &Value, reason: &str) -> ConsensusError {
    ConsensusError::MalformedVector(format!("{}: {}", reason, row))
}

/// Parse one fixture row. `Ok(None)` means a comment row; `Err` carries the
/// offending row's JSON rendering.
pub fn parse_vector_row(row: &Value) -> Result<Option<SighashVector>> {
    let entries = row
        .as_array()
        .ok_or_else(|| malformed(row, "row is not an array"))?;
    if entries.is_empty() {
        return Err(malformed(row, "empty row"));
    }
    if entries.len() == 1 {
        return Ok(None); // comment
    }
    if entries.len() != 5 {
        return Err(malformed(row, "expected 5 fields"));
    }

    let tx_hex = entries[0]
        .as_str()
        .ok_or_else(|| malformed(row, "raw transaction is not a string"))?;
    let script_hex = entries[1]
        .as_str()
        .ok_or_else(|| malformed(row, "raw script is not a string"))?;
    let input_index = entries[2]
        .as_u64()
        .ok_or_else(|| malformed(row, "input index is not an unsigned integer"))?;
    let hash_type = entries[3]
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| malformed(row, "hash type is not a 32-bit integer"))?;
    let expected = entries[4]
        .as_str()
        .ok_or_else(|| malformed(row, "expected digest is not a string"))?;

    let raw_tx =
        hex::decode(tx_hex).map_err(|e| malformed(row, &format!("bad transaction hex ({})", e)))?;
    let raw_script =
        hex::decode(script_hex).map_err(|e| malformed(row, &format!("bad script hex ({})", e)))?;
    if expected.len() != 64 || hex::decode(expected).is_err() {
        return Err(malformed(row, "expected digest is not 64 hex characters"));
    }

    Ok(Some(SighashVector {
        raw_tx,
        raw_script,
        input_index: input_index as usize,
        hash_type,
        expected_digest_hex: expected.to_ascii_lowercase(),
    }))
}

/// Validate one vector end to end: decode the transaction, require it to
/// re-encode byte-exactly and pass the structural check, hash with the raw
/// script bytes appended verbatim as script code, and compare the rendered
/// digest against the expectation.
pub fn check_vector(vector: &SighashVector) -> Result<()> {
    let tx = deserialize_transaction(&vector.raw_tx)?;
    if serialize_transaction(&tx) != vector.raw_tx {
        return Err(ConsensusError::Serialization(format!(
            "transaction did not round-trip: {}",
            hex::encode(&vector.raw_tx)
        )));
    }
    match check_transaction(&tx)? {
        ValidationResult::Valid => {}
        ValidationResult::Invalid(reason) => {
            return Err(ConsensusError::TransactionValidation(format!(
                "structurally invalid vector transaction ({}): {}",
                reason,
                hex::encode(&vector.raw_tx)
            )));
        }
    }

    let script_code = Script::from_bytes(vector.raw_script.clone());
    let digest = signature_hash(&script_code, &tx, vector.input_index, vector.hash_type);
    let rendered = digest_to_hex(&digest);
    if rendered != vector.expected_digest_hex {
        return Err(ConsensusError::MalformedVector(format!(
            "digest mismatch: got {} expected {} (tx={} script={} input_index={} hash_type={})",
            rendered,
            vector.expected_digest_hex,
            hex::encode(&vector.raw_tx),
            hex::encode(&vector.raw_script),
            vector.input_index,
            vector.hash_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{OP_1, OP_CHECKSIG, SEQUENCE_FINAL};
    use serde_json::json;

    fn sample_tx() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: OutPoint {
                    hash: [9; 32],
                    index: 0,
                },
                script_sig: Script::new(),
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TransactionOutput {
                value: 5000,
                script_pubkey: Script::new(),
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_comment_rows_are_skipped() {
        let row = json!(["just a comment"]);
        assert!(parse_vector_row(&row).unwrap().is_none());
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let row = json!(["aa", "bb", 0]);
        let err = parse_vector_row(&row).unwrap_err();
        assert!(err.to_string().contains("expected 5 fields"));
    }

    #[test]
    fn test_bad_hex_is_rejected_with_row_attached() {
        let row = json!(["not-hex", "51", 0, 1, "00".repeat(32)]);
        let err = parse_vector_row(&row).unwrap_err();
        assert!(err.to_string().contains("not-hex"));
    }

    #[test]
    fn test_bad_digest_length_is_rejected() {
        let row = json!(["00", "51", 0, 1, "abcd"]);
        assert!(parse_vector_row(&row).is_err());
    }

    #[test]
    fn test_negative_hash_type_parses() {
        let row = json!(["00", "", 0, -1, "00".repeat(32)]);
        let vector = parse_vector_row(&row).unwrap().unwrap();
        assert_eq!(vector.hash_type, -1);
    }

    #[test]
    fn test_check_vector_accepts_correct_digest() {
        let tx = sample_tx();
        let script = Script::from_bytes(vec![OP_1, OP_CHECKSIG]);
        let digest = signature_hash(&script, &tx, 0, 1);
        let vector = SighashVector {
            raw_tx: serialize_transaction(&tx),
            raw_script: script.as_bytes().to_vec(),
            input_index: 0,
            hash_type: 1,
            expected_digest_hex: digest_to_hex(&digest),
        };
        check_vector(&vector).unwrap();
    }

    #[test]
    fn test_check_vector_rejects_wrong_digest() {
        let tx = sample_tx();
        let vector = SighashVector {
            raw_tx: serialize_transaction(&tx),
            raw_script: vec![OP_1],
            input_index: 0,
            hash_type: 1,
            expected_digest_hex: "00".repeat(32),
        };
        let err = check_vector(&vector).unwrap_err();
        assert!(err.to_string().contains("digest mismatch"));
    }

    #[test]
    fn test_check_vector_rejects_invalid_transaction() {
        let mut tx = sample_tx();
        tx.outputs.clear();
        let vector = SighashVector {
            raw_tx: serialize_transaction(&tx),
            raw_script: vec![],
            input_index: 0,
            hash_type: 1,
            expected_digest_hex: "00".repeat(32),
        };
        let err = check_vector(&vector).unwrap_err();
        assert!(matches!(err, ConsensusError::TransactionValidation(_)));
    }
}
