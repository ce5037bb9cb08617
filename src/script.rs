//! Script values: opaque opcode/data byte sequences
//!
//! Scripts are never executed here; the signature-hash engine only needs to
//! append opcodes and raw bytes, and to strip every occurrence of one opcode
//! (OP_CODESEPARATOR) without misreading push payload bytes as opcodes.

use crate::constants::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::types::ByteString;
use serde::{Deserialize, Serialize};

/// Ordered sequence of opcode/data bytes with value semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script(ByteString);

impl Script {
    /// Create an empty script
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from raw bytes, appended verbatim
    pub fn from_bytes(bytes: ByteString) -> Self {
        Script(bytes)
    }

    /// Append a single opcode
    pub fn push_opcode(&mut self, opcode: u8) {
        self.0.push(opcode);
    }

    /// Append raw bytes verbatim, without push-length framing
    pub fn push_slice(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a copy with every occurrence of `opcode` removed.
    ///
    /// The walk is opcode-aware: bytes carried by push instructions (direct
    /// pushes 0x01..=0x4b and OP_PUSHDATA1/2/4) are copied through untouched
    /// even when they happen to equal `opcode`. A push whose declared length
    /// runs past the end of the script is kept verbatim up to the end.
    pub fn without_opcode(&self, opcode: u8) -> Script {
        let bytes = &self.0;
        let n = bytes.len();
        let mut out = Vec::with_capacity(n);
        let mut i = 0;
        while i < n {
            let op = bytes[i];
            let (header, data_len) = match op {
                0x01..=0x4b => (1, op as usize),
                OP_PUSHDATA1 => (2, if i + 1 < n { bytes[i + 1] as usize } else { 0 }),
                OP_PUSHDATA2 => (
                    3,
                    if i + 3 <= n {
                        u16::from_le_bytes([bytes[i + 1], bytes[i + 2]]) as usize
                    } else {
                        0
                    },
                ),
                OP_PUSHDATA4 => (
                    5,
                    if i + 5 <= n {
                        u32::from_le_bytes([bytes[i + 1], bytes[i + 2], bytes[i + 3], bytes[i + 4]])
                            as usize
                    } else {
                        0
                    },
                ),
                _ => (1, 0),
            };
            let end = if i + header > n {
                n
            } else {
                n.min(i + header + data_len)
            };
            if op != opcode {
                out.extend_from_slice(&bytes[i..end]);
            }
            i = end;
        }
        Script(out)
    }
}

impl From<ByteString> for Script {
    fn from(bytes: ByteString) -> Self {
        Script(bytes)
    }
}
