//! Core transaction types for signature-hash computation

use crate::script::Script;
use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash, little-endian internal byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// OutPoint: reference to a previous transaction output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction Input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// Transaction Output
///
/// `value` is a satoshi amount; valid transactions keep it in `[0, MAX_MONEY]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: i64,
    pub script_pubkey: Script,
}

/// Transaction: version, ordered inputs, ordered outputs, lock time.
///
/// Treated as immutable once built: the signature-hash engine works on a
/// private copy and never mutates the caller's transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}
