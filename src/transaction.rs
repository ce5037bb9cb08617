//! Structural transaction sanity checks
//!
//! The vector harness refuses to hash a structurally broken transaction:
//! a fixture referencing one is an authoring error, not an engine case.

use crate::constants::MAX_MONEY;
use crate::error::Result;
use crate::types::*;
use std::collections::HashSet;

/// Check the structural validity of a transaction:
/// 1. inputs and outputs are non-empty
/// 2. every output value lies in [0, MAX_MONEY]
/// 3. no two inputs spend the same previous output
pub fn check_transaction(tx: &Transaction) -> Result<ValidationResult> {
    // 1. Check inputs and outputs are not empty
    if tx.inputs.is_empty() || tx.outputs.is_empty() {
        return Ok(ValidationResult::Invalid(
            "Empty inputs or outputs".to_string(),
        ));
    }

    // 2. Check output values are valid
    for (i, output) in tx.outputs.iter().enumerate() {
        if output.value < 0 || output.value > MAX_MONEY {
            return Ok(ValidationResult::Invalid(format!(
                "Invalid output value {} at index {}",
                output.value, i
            )));
        }
    }

    // 3. Check for in-transaction double spends
    let mut seen = HashSet::new();
    for (i, input) in tx.inputs.iter().enumerate() {
        if !seen.insert(&input.prevout) {
            return Ok(ValidationResult::Invalid(format!(
                "Duplicate previous output at input {}",
                i
            )));
        }
    }

    Ok(ValidationResult::Valid)
}
