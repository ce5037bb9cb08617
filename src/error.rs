//! Error types for signature-hash computation and its harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("Transaction validation failed: {0}")]
    TransactionValidation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed test vector: {0}")]
    MalformedVector(String),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
