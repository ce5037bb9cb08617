//! Legacy signature-hash engine
//!
//! `signature_hash` computes the digest a transaction signature commits to:
//! a canonicalized view of the transaction serialized with the raw hash type
//! appended, then double SHA-256. The out-of-range branches return a fixed
//! digest of 1 instead of failing; legacy verifiers depend on that exact
//! behavior, so it is modeled as a normal return value and never as an error.
//!
//! Two independently structured implementations of the same contract live
//! here: [`signature_hash`] mutates a private working copy and reuses the
//! canonical serializer, while [`signature_hash_streamed`] writes the
//! canonicalized byte stream directly without building the copy. They also
//! use different double-SHA-256 backends. The differential harness checks
//! them against each other.

use crate::constants::*;
use crate::script::Script;
use crate::serialize::{serialize_transaction, write_compact_size};
use crate::types::{Hash, Transaction};
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};
use sha2::{Digest, Sha256};

/// The digest returned for out-of-range indices: 0x01 followed by 31 zero
/// bytes in the digest's little-endian internal order
pub const ONE_HASH: Hash = {
    let mut hash = [0u8; 32];
    hash[0] = 1;
    hash
};

/// Base hash type selected by the low five bits of the raw hash type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSighash {
    /// Commits to all outputs (also the behavior of unrecognized patterns)
    All,
    /// Commits to no outputs
    None,
    /// Commits to the output paired with the signed input
    Single,
}

/// Decoded hash-type bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SighashType {
    pub base: BaseSighash,
    pub anyone_can_pay: bool,
}

impl SighashType {
    /// Decode a raw hash-type integer. Pure, total: every input decodes,
    /// unrecognized low-five-bit patterns behave as `All`.
    pub fn from_raw(raw: i32) -> Self {
        let base = match (raw & SIGHASH_BASE_MASK) as u8 {
            SIGHASH_NONE => BaseSighash::None,
            SIGHASH_SINGLE => BaseSighash::Single,
            _ => BaseSighash::All,
        };
        SighashType {
            base,
            anyone_can_pay: raw & (SIGHASH_ANYONECANPAY as i32) != 0,
        }
    }
}

/// One capability, two implementations: the differential harness substitutes
/// either side through this trait.
pub trait SignatureHasher {
    fn signature_hash(
        &self,
        script_code: &Script,
        tx: &Transaction,
        input_index: usize,
        hash_type: i32,
    ) -> Hash;
}

/// [`signature_hash`] behind the [`SignatureHasher`] capability
pub struct WorkingCopySighash;

impl SignatureHasher for WorkingCopySighash {
    fn signature_hash(
        &self,
        script_code: &Script,
        tx: &Transaction,
        input_index: usize,
        hash_type: i32,
    ) -> Hash {
        signature_hash(script_code, tx, input_index, hash_type)
    }
}

/// [`signature_hash_streamed`] behind the [`SignatureHasher`] capability
pub struct StreamingSighash;

impl SignatureHasher for StreamingSighash {
    fn signature_hash(
        &self,
        script_code: &Script,
        tx: &Transaction,
        input_index: usize,
        hash_type: i32,
    ) -> Hash {
        signature_hash_streamed(script_code, tx, input_index, hash_type)
    }
}

/// Compute the legacy signature hash of `tx` for input `input_index`.
///
/// Canonicalization, applied to a private working copy:
/// 1. every OP_CODESEPARATOR is stripped from `script_code`;
/// 2. every input's script_sig is emptied except input `input_index`, which
///    carries the stripped `script_code`;
/// 3. `SIGHASH_NONE` clears the outputs, `SIGHASH_SINGLE` truncates them to
///    `input_index + 1` and nulls (zero value, empty script) the earlier
///    ones; both zero the sequence of every other input;
/// 4. `SIGHASH_ANYONECANPAY` collapses the inputs to the one being signed;
/// 5. the result is serialized, the raw `hash_type` appended as 4
///    little-endian bytes, and the buffer double-SHA-256 hashed.
///
/// `input_index >= tx.inputs.len()`, or `input_index >= tx.outputs.len()`
/// under `SIGHASH_SINGLE`, returns [`ONE_HASH`]. The caller's transaction is
/// never mutated.
///
/// # Examples
///
/// ```
/// use sighash_proof::sighash::{signature_hash, ONE_HASH};
/// use sighash_proof::script::Script;
/// use sighash_proof::types::*;
///
/// let tx = Transaction {
///     version: 1,
///     inputs: vec![TransactionInput {
///         prevout: OutPoint { hash: [0u8; 32], index: 0 },
///         script_sig: Script::new(),
///         sequence: 0xffffffff,
///     }],
///     outputs: vec![TransactionOutput {
///         value: 1000,
///         script_pubkey: Script::new(),
///     }],
///     lock_time: 0,
/// };
///
/// // Out-of-range input index yields the fixed digest 1, not an error.
/// assert_eq!(signature_hash(&Script::new(), &tx, 1, 1), ONE_HASH);
/// // In-range indices produce a real digest.
/// assert_ne!(signature_hash(&Script::new(), &tx, 0, 1), ONE_HASH);
/// ```
pub fn signature_hash(
    script_code: &Script,
    tx: &Transaction,
    input_index: usize,
    hash_type: i32,
) -> Hash {
    if input_index >= tx.inputs.len() {
        return ONE_HASH;
    }
    let sighash_type = SighashType::from_raw(hash_type);
    let mut working = tx.clone();

    // Concatenated scripts can carry multiple code separators; stripping them
    // all keeps the committed script unambiguous.
    let script_code = script_code.without_opcode(OP_CODESEPARATOR);

    for input in &mut working.inputs {
        input.script_sig = Script::new();
    }
    working.inputs[input_index].script_sig = script_code;

    match sighash_type.base {
        BaseSighash::None => {
            // Wildcard payee: no output is committed to, and other inputs'
            // sequences stay freely updatable.
            working.outputs.clear();
            zero_other_sequences(&mut working, input_index);
        }
        BaseSighash::Single => {
            // Only the output at the signed input's index is locked in.
            let n_out = input_index;
            if n_out >= working.outputs.len() {
                return ONE_HASH;
            }
            working.outputs.truncate(n_out + 1);
            for output in &mut working.outputs[..n_out] {
                output.value = 0;
                output.script_pubkey = Script::new();
            }
            zero_other_sequences(&mut working, input_index);
        }
        BaseSighash::All => {}
    }

    if sighash_type.anyone_can_pay {
        working.inputs = vec![working.inputs[input_index].clone()];
    }

    let mut preimage = serialize_transaction(&working);
    preimage.extend_from_slice(&hash_type.to_le_bytes());
    sha256d::Hash::hash(&preimage).into_inner()
}

fn zero_other_sequences(tx: &mut Transaction, input_index: usize) {
    for (i, input) in tx.inputs.iter_mut().enumerate() {
        if i != input_index {
            input.sequence = 0;
        }
    }
}

/// Compute the same digest as [`signature_hash`] by serializing the
/// canonicalized view field by field, without materializing a working copy.
pub fn signature_hash_streamed(
    script_code: &Script,
    tx: &Transaction,
    input_index: usize,
    hash_type: i32,
) -> Hash {
    if input_index >= tx.inputs.len() {
        return ONE_HASH;
    }
    let sighash_type = SighashType::from_raw(hash_type);
    let blank_outputs = sighash_type.base == BaseSighash::None;
    let single = sighash_type.base == BaseSighash::Single;
    if single && input_index >= tx.outputs.len() {
        return ONE_HASH;
    }
    let script_code = script_code.without_opcode(OP_CODESEPARATOR);

    let mut buf = Vec::new();
    buf.extend_from_slice(&tx.version.to_le_bytes());

    let input_count = if sighash_type.anyone_can_pay {
        1
    } else {
        tx.inputs.len()
    };
    write_compact_size(&mut buf, input_count as u64);
    for serialized in 0..input_count {
        let i = if sighash_type.anyone_can_pay {
            input_index
        } else {
            serialized
        };
        let input = &tx.inputs[i];
        buf.extend_from_slice(&input.prevout.hash);
        buf.extend_from_slice(&input.prevout.index.to_le_bytes());
        if i == input_index {
            write_compact_size(&mut buf, script_code.len() as u64);
            buf.extend_from_slice(script_code.as_bytes());
        } else {
            write_compact_size(&mut buf, 0);
        }
        let sequence = if i != input_index && (blank_outputs || single) {
            0
        } else {
            input.sequence
        };
        buf.extend_from_slice(&sequence.to_le_bytes());
    }

    let output_count = if blank_outputs {
        0
    } else if single {
        input_index + 1
    } else {
        tx.outputs.len()
    };
    write_compact_size(&mut buf, output_count as u64);
    for o in 0..output_count {
        if single && o < input_index {
            buf.extend_from_slice(&0i64.to_le_bytes());
            write_compact_size(&mut buf, 0);
        } else {
            let output = &tx.outputs[o];
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(output.script_pubkey.as_bytes());
        }
    }

    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf.extend_from_slice(&hash_type.to_le_bytes());

    let first = Sha256::digest(&buf);
    let second = Sha256::digest(first);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&second);
    digest
}
