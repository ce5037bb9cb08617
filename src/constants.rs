//! Consensus constants used by the signature-hash engine

/// Maximum money supply: 21,000,000 coins in satoshis
pub const MAX_MONEY: i64 = 21_000_000 * 100_000_000;

/// Sequence number for a final input
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Signature commits to all outputs
pub const SIGHASH_ALL: u8 = 0x01;

/// Signature commits to no outputs (wildcard payee)
pub const SIGHASH_NONE: u8 = 0x02;

/// Signature commits to the single output paired with the signed input
pub const SIGHASH_SINGLE: u8 = 0x03;

/// Signature commits only to the signer's own input
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Mask selecting the base hash type from a raw hash-type integer
pub const SIGHASH_BASE_MASK: i32 = 0x1f;

/// OP_0 / OP_FALSE - push empty array
pub const OP_FALSE: u8 = 0x00;

/// OP_PUSHDATA1 - next byte is the push length
pub const OP_PUSHDATA1: u8 = 0x4c;

/// OP_PUSHDATA2 - next two bytes (LE) are the push length
pub const OP_PUSHDATA2: u8 = 0x4d;

/// OP_PUSHDATA4 - next four bytes (LE) are the push length
pub const OP_PUSHDATA4: u8 = 0x4e;

/// OP_1 - push the number 1
pub const OP_1: u8 = 0x51;

/// OP_2 - push the number 2
pub const OP_2: u8 = 0x52;

/// OP_3 - push the number 3
pub const OP_3: u8 = 0x53;

/// OP_IF - conditional execution
pub const OP_IF: u8 = 0x63;

/// OP_VERIF - reserved opcode, always invalid when executed
pub const OP_VERIF: u8 = 0x65;

/// OP_RETURN - marks output unspendable
pub const OP_RETURN: u8 = 0x6a;

/// OP_CODESEPARATOR - historical signature-scope marker, stripped before hashing
pub const OP_CODESEPARATOR: u8 = 0xab;

/// OP_CHECKSIG - signature check
pub const OP_CHECKSIG: u8 = 0xac;
