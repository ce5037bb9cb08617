//! Canonical wire encoding for transactions (legacy, pre-witness layout)
//!
//! The signature hash is only meaningful against a bit-exact encoding, so
//! this module defines it precisely: little-endian fixed-width fields and
//! compact-size prefixed variable-length fields.

use crate::error::{ConsensusError, Result};
use crate::script::Script;
use crate::types::*;

/// Write a compact-size integer
pub fn write_compact_size(buf: &mut ByteString, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

/// Serialize a transaction with the canonical wire encoding
pub fn serialize_transaction(tx: &Transaction) -> ByteString {
    let mut buf = Vec::new();
    buf.extend_from_slice(&tx.version.to_le_bytes());
    write_compact_size(&mut buf, tx.inputs.len() as u64);
    for input in &tx.inputs {
        buf.extend_from_slice(&input.prevout.hash);
        buf.extend_from_slice(&input.prevout.index.to_le_bytes());
        write_compact_size(&mut buf, input.script_sig.len() as u64);
        buf.extend_from_slice(input.script_sig.as_bytes());
        buf.extend_from_slice(&input.sequence.to_le_bytes());
    }
    write_compact_size(&mut buf, tx.outputs.len() as u64);
    for output in &tx.outputs {
        buf.extend_from_slice(&output.value.to_le_bytes());
        write_compact_size(&mut buf, output.script_pubkey.len() as u64);
        buf.extend_from_slice(output.script_pubkey.as_bytes());
    }
    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf
}

/// Cursor over a byte slice for decoding
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.bytes.len() - self.pos {
            return Err(ConsensusError::Serialization(format!(
                "unexpected end of data at byte {} (wanted {} more)",
                self.pos, n
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i64(&mut self) -> Result<i64> {
        let b = self.take(8)?;
        Ok(i64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_hash(&mut self) -> Result<Hash> {
        let b = self.take(32)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(b);
        Ok(hash)
    }

    fn read_compact_size(&mut self) -> Result<u64> {
        let tag = self.take(1)?[0];
        match tag {
            0xfd => {
                let b = self.take(2)?;
                Ok(u16::from_le_bytes([b[0], b[1]]) as u64)
            }
            0xfe => Ok(self.read_u32()? as u64),
            0xff => {
                let b = self.take(8)?;
                Ok(u64::from_le_bytes([
                    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
                ]))
            }
            n => Ok(n as u64),
        }
    }

    fn read_script(&mut self) -> Result<Script> {
        let len = self.read_compact_size()?;
        Ok(Script::from_bytes(self.take(len as usize)?.to_vec()))
    }
}

/// Deserialize a transaction, requiring the buffer to be exactly one
/// transaction with no trailing bytes
pub fn deserialize_transaction(bytes: &[u8]) -> Result<Transaction> {
    let mut reader = Reader::new(bytes);

    let version = reader.read_u32()?;
    let input_count = reader.read_compact_size()?;
    let mut inputs = Vec::with_capacity(input_count.min(1024) as usize);
    for _ in 0..input_count {
        inputs.push(TransactionInput {
            prevout: OutPoint {
                hash: reader.read_hash()?,
                index: reader.read_u32()?,
            },
            script_sig: reader.read_script()?,
            sequence: reader.read_u32()?,
        });
    }
    let output_count = reader.read_compact_size()?;
    let mut outputs = Vec::with_capacity(output_count.min(1024) as usize);
    for _ in 0..output_count {
        outputs.push(TransactionOutput {
            value: reader.read_i64()?,
            script_pubkey: reader.read_script()?,
        });
    }
    let lock_time = reader.read_u32()?;

    if reader.pos != bytes.len() {
        return Err(ConsensusError::Serialization(format!(
            "{} trailing bytes after transaction",
            bytes.len() - reader.pos
        )));
    }

    Ok(Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}

/// Render a digest with the established display convention: reversed byte
/// order, lowercase hex, 64 characters
pub fn digest_to_hex(hash: &Hash) -> String {
    let mut bytes = *hash;
    bytes.reverse();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn sample_tx() -> Transaction {
        Transaction {
            version: 2,
            inputs: vec![
                TransactionInput {
                    prevout: OutPoint {
                        hash: [0x11; 32],
                        index: 1,
                    },
                    script_sig: Script::from_bytes(vec![OP_1, OP_CHECKSIG]),
                    sequence: SEQUENCE_FINAL,
                },
                TransactionInput {
                    prevout: OutPoint {
                        hash: [0x22; 32],
                        index: 3,
                    },
                    script_sig: Script::new(),
                    sequence: 0,
                },
            ],
            outputs: vec![TransactionOutput {
                value: 99_999_999,
                script_pubkey: Script::from_bytes(vec![OP_RETURN]),
            }],
            lock_time: 500_000,
        }
    }

    #[test]
    fn test_round_trip() {
        let tx = sample_tx();
        let encoded = serialize_transaction(&tx);
        let decoded = deserialize_transaction(&encoded).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(serialize_transaction(&decoded), encoded);
    }

    #[test]
    fn test_known_encoding() {
        let tx = Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: OutPoint {
                    hash: [0; 32],
                    index: 0xffffffff,
                },
                script_sig: Script::new(),
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TransactionOutput {
                value: 0,
                script_pubkey: Script::new(),
            }],
            lock_time: 0,
        };
        let mut expected = vec![1, 0, 0, 0, 1];
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(&[0xff; 4]); // prevout index
        expected.push(0); // empty script_sig
        expected.extend_from_slice(&[0xff; 4]); // sequence
        expected.push(1); // output count
        expected.extend_from_slice(&[0; 8]); // value
        expected.push(0); // empty script_pubkey
        expected.extend_from_slice(&[0; 4]); // lock_time
        assert_eq!(serialize_transaction(&tx), expected);
    }

    #[test]
    fn test_compact_size_boundaries() {
        let cases: [(u64, usize); 6] = [
            (0, 1),
            (0xfc, 1),
            (0xfd, 3),
            (0xffff, 3),
            (0x10000, 5),
            (0x1_0000_0000, 9),
        ];
        for (value, encoded_len) in cases {
            let mut buf = Vec::new();
            write_compact_size(&mut buf, value);
            assert_eq!(buf.len(), encoded_len, "compact size of {}", value);
            let mut reader = Reader::new(&buf);
            assert_eq!(reader.read_compact_size().unwrap(), value);
            assert_eq!(reader.pos, buf.len());
        }
    }

    #[test]
    fn test_truncated_transaction_rejected() {
        let encoded = serialize_transaction(&sample_tx());
        let result = deserialize_transaction(&encoded[..encoded.len() - 1]);
        assert!(matches!(result, Err(ConsensusError::Serialization(_))));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut encoded = serialize_transaction(&sample_tx());
        encoded.push(0x00);
        let result = deserialize_transaction(&encoded);
        assert!(matches!(result, Err(ConsensusError::Serialization(_))));
    }

    #[test]
    fn test_negative_value_round_trips() {
        // Wire format carries i64 two's complement; range checks live in
        // check_transaction, not here.
        let mut tx = sample_tx();
        tx.outputs[0].value = -1;
        let decoded = deserialize_transaction(&serialize_transaction(&tx)).unwrap();
        assert_eq!(decoded.outputs[0].value, -1);
    }

    #[test]
    fn test_digest_to_hex_reverses_bytes() {
        let mut hash = [0u8; 32];
        hash[0] = 0x01;
        hash[31] = 0xab;
        let rendered = digest_to_hex(&hash);
        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with("ab"));
        assert!(rendered.ends_with("01"));
    }
}
