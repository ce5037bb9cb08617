//! Synthetic script and transaction generator for differential testing

use crate::constants::*;
use crate::random::InsecureRand;
use crate::script::Script;
use crate::types::*;

/// Opcode palette for random scripts: a mix of pushes, flow control, a
/// signature check, a reserved opcode, and the code separator the engine
/// must strip
const OPCODE_PALETTE: [u8; 9] = [
    OP_FALSE,
    OP_1,
    OP_2,
    OP_3,
    OP_CHECKSIG,
    OP_IF,
    OP_VERIF,
    OP_RETURN,
    OP_CODESEPARATOR,
];

/// Draw a random script: 0 to 9 opcodes from the fixed palette
pub fn random_script(rng: &mut InsecureRand) -> Script {
    let ops = rng.rand_range(10);
    let mut script = Script::new();
    for _ in 0..ops {
        script.push_opcode(OPCODE_PALETTE[rng.rand_range(OPCODE_PALETTE.len())]);
    }
    script
}

/// Draw a random transaction with 1 to 4 inputs and 1 to 4 outputs.
///
/// `force_equal_counts` pins the output count to the input count so that
/// SIGHASH_SINGLE always has a matching output to commit to.
pub fn random_transaction(rng: &mut InsecureRand, force_equal_counts: bool) -> Transaction {
    let input_count = rng.rand_range(4) + 1;
    let output_count = if force_equal_counts {
        input_count
    } else {
        rng.rand_range(4) + 1
    };

    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        inputs.push(TransactionInput {
            prevout: OutPoint {
                hash: rng.rand_hash(),
                index: rng.rand_range(4) as u32,
            },
            script_sig: random_script(rng),
            sequence: if rng.rand_bool() {
                rng.next_u32()
            } else {
                SEQUENCE_FINAL
            },
        });
    }

    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        outputs.push(TransactionOutput {
            value: rng.rand_range(100_000_000) as i64,
            script_pubkey: random_script(rng),
        });
    }

    Transaction {
        version: rng.next_u32(),
        inputs,
        outputs,
        lock_time: if rng.rand_bool() { rng.next_u32() } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_script_bounds_and_palette() {
        let mut rng = InsecureRand::new(11);
        for _ in 0..500 {
            let script = random_script(&mut rng);
            assert!(script.len() <= 9);
            for byte in script.as_bytes() {
                assert!(OPCODE_PALETTE.contains(byte), "opcode {:#x}", byte);
            }
        }
    }

    #[test]
    fn test_random_transaction_counts() {
        let mut rng = InsecureRand::new(13);
        for _ in 0..500 {
            let tx = random_transaction(&mut rng, false);
            assert!((1..=4).contains(&tx.inputs.len()));
            assert!((1..=4).contains(&tx.outputs.len()));
            for input in &tx.inputs {
                assert!(input.prevout.index < 4);
            }
            for output in &tx.outputs {
                assert!((0..100_000_000).contains(&output.value));
            }
        }
    }

    #[test]
    fn test_force_equal_counts() {
        let mut rng = InsecureRand::new(17);
        for _ in 0..500 {
            let tx = random_transaction(&mut rng, true);
            assert_eq!(tx.inputs.len(), tx.outputs.len());
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let mut a = InsecureRand::new(19);
        let mut b = InsecureRand::new(19);
        for _ in 0..100 {
            assert_eq!(random_script(&mut a), random_script(&mut b));
            assert_eq!(
                random_transaction(&mut a, false),
                random_transaction(&mut b, false)
            );
        }
    }
}
