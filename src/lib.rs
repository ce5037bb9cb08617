//! # Sighash-Proof
//!
//! Direct implementation of the legacy signature-hash construction for
//! financial transaction records, together with the harness that proves a
//! reimplementation equivalent to a trusted reference.
//!
//! The signature hash is consensus-critical: two conforming implementations
//! must produce bit-identical digests for the same inputs or signatures
//! created under one will be rejected by the other. That includes the
//! historical quirks - out-of-range indices return a fixed digest of 1
//! instead of failing, and that behavior is preserved on purpose.
//!
//! ## Architecture
//!
//! - [`types`] / [`script`]: the transaction and script value model
//! - [`serialize`]: the canonical wire encoding the digest commits to
//! - [`sighash`]: the engine, in two independently structured
//!   implementations behind one [`sighash::SignatureHasher`] capability
//! - [`random`] / [`generator`]: deterministic synthetic input generation
//! - [`differential`]: random differential comparison of two implementations
//! - [`vectors`]: fixed-vector validation against known-correct digests
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: hashing never mutates the caller's transaction and
//!    has no side effects; the only state anywhere is the explicitly seeded
//!    random source
//! 2. **Bug Compatibility**: historical out-of-range behavior is a normal
//!    return value, never an error
//! 3. **Exact Version Pinning**: consensus-critical hash dependencies are
//!    pinned to exact versions
//! 4. **Reproducibility**: every randomized check replays byte-for-byte from
//!    its seed, and failures report full concrete inputs
//!
//! ## Usage
//!
//! ```rust
//! use sighash_proof::script::Script;
//! use sighash_proof::sighash::signature_hash;
//! use sighash_proof::types::*;
//!
//! let tx = Transaction {
//!     version: 1,
//!     inputs: vec![TransactionInput {
//!         prevout: OutPoint { hash: [0u8; 32], index: 0 },
//!         script_sig: Script::new(),
//!         sequence: 0xffffffff,
//!     }],
//!     outputs: vec![TransactionOutput {
//!         value: 1000,
//!         script_pubkey: Script::new(),
//!     }],
//!     lock_time: 0,
//! };
//!
//! let mut script_code = Script::new();
//! script_code.push_opcode(0xac); // OP_CHECKSIG
//! let digest = signature_hash(&script_code, &tx, 0, 1);
//! assert_eq!(digest.len(), 32);
//! ```

pub mod constants;
pub mod differential;
pub mod error;
pub mod generator;
pub mod random;
pub mod script;
pub mod serialize;
pub mod sighash;
pub mod transaction;
pub mod types;
pub mod vectors;

// Re-export commonly used types
pub use constants::*;
pub use error::{ConsensusError, Result};
pub use script::Script;
pub use sighash::{signature_hash, SighashType, SignatureHasher, ONE_HASH};
pub use types::*;
