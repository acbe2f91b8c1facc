//! Signature hashes
//!
//! - legacy: serialize a modified copy of the transaction, double SHA-256
//! - witness v0 (BIP143): double SHA-256 over a fixed preimage with aggregate hashes
//! - ZIP143: the BIP143 layout extended for Overwinter, hashed with personalized BLAKE2b-256

use crate::encoding::Writer;
use crate::hashes::{blake2b_256_personal, hash256};
use crate::script::strip_code_separators;
use crate::zcash::{sighash_personalization, OVERWINTERED_FLAG, OVERWINTER_BRANCH_ID};

use super::{
    OutputValue, PreconditionError, Transaction, TxError, TxInput, TxOutput,
    UnsupportedOperationError,
};

pub const SIGHASH_ALL: u32 = 0x01;
pub const SIGHASH_NONE: u32 = 0x02;
pub const SIGHASH_SINGLE: u32 = 0x03;
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;
pub const SIGHASH_MASK: u32 = 0x1f;

/// Returned by the legacy algorithm when there is nothing valid to sign
pub const SIGHASH_ONE: [u8; 32] = {
    let mut one = [0u8; 32];
    one[0] = 1;
    one
};

const ZERO_HASH: [u8; 32] = [0; 32];

const PREVOUTS_PERSONALIZATION: &[u8; 16] = b"ZcashPrevoutHash";
const SEQUENCE_PERSONALIZATION: &[u8; 16] = b"ZcashSequencHash";
const OUTPUTS_PERSONALIZATION: &[u8; 16] = b"ZcashOutputsHash";
const JOINSPLITS_PERSONALIZATION: &[u8; 16] = b"ZcashJSplitsHash";

fn base_type(hash_type: u32) -> u32 {
    hash_type & SIGHASH_MASK
}

fn is_anyone_can_pay(hash_type: u32) -> bool {
    hash_type & SIGHASH_ANYONECANPAY != 0
}

/// Aggregate hashes shared by BIP143 and ZIP143
struct Aggregates {
    prevouts: [u8; 32],
    sequence: [u8; 32],
    outputs: [u8; 32],
}

impl Aggregates {
    fn compute(
        tx: &Transaction,
        in_index: usize,
        hash_type: u32,
        hash: impl Fn(&[u8; 16], &[u8]) -> [u8; 32],
    ) -> Self {
        let base = base_type(hash_type);
        let anyone_can_pay = is_anyone_can_pay(hash_type);
        let single_or_none = base == SIGHASH_SINGLE || base == SIGHASH_NONE;

        let prevouts = if anyone_can_pay {
            ZERO_HASH
        } else {
            let mut writer = Writer::with_capacity(36 * tx.inputs.len());
            for input in &tx.inputs {
                writer.write_slice(&input.hash);
                writer.write_u32(input.index);
            }
            hash(PREVOUTS_PERSONALIZATION, &writer.into_bytes())
        };

        let sequence = if anyone_can_pay || single_or_none {
            ZERO_HASH
        } else {
            let mut writer = Writer::with_capacity(4 * tx.inputs.len());
            for input in &tx.inputs {
                writer.write_u32(input.sequence);
            }
            hash(SEQUENCE_PERSONALIZATION, &writer.into_bytes())
        };

        let outputs = if !single_or_none {
            hash(OUTPUTS_PERSONALIZATION, &serialize_outputs(&tx.outputs))
        } else if base == SIGHASH_SINGLE && in_index < tx.outputs.len() {
            hash(
                OUTPUTS_PERSONALIZATION,
                &serialize_outputs(std::slice::from_ref(&tx.outputs[in_index])),
            )
        } else {
            ZERO_HASH
        };

        Aggregates {
            prevouts,
            sequence,
            outputs,
        }
    }
}

fn serialize_outputs(outputs: &[TxOutput]) -> Vec<u8> {
    let mut writer = Writer::with_capacity(outputs.iter().map(|o| 9 + o.script.len()).sum());
    for output in outputs {
        writer.write_slice(&output.value.to_le_bytes());
        writer.write_var_slice(&output.script);
    }
    writer.into_bytes()
}

fn write_outpoint(writer: &mut Writer, input: &TxInput) {
    writer.write_slice(&input.hash);
    writer.write_u32(input.index);
}

impl Transaction {
    /// Legacy signature hash of input `in_index` spending `prev_out_script`.
    ///
    /// An out-of-range input, or SIGHASH_SINGLE without a matching output, yields
    /// [`SIGHASH_ONE`] instead of an error.
    pub fn hash_for_signature(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        hash_type: u32,
    ) -> Result<[u8; 32], PreconditionError> {
        if in_index >= self.inputs.len() {
            return Ok(SIGHASH_ONE);
        }

        let script = strip_code_separators(prev_out_script)?;
        let base = base_type(hash_type);
        if base == SIGHASH_SINGLE && in_index >= self.outputs.len() {
            return Ok(SIGHASH_ONE);
        }

        let mut tx = self.legacy_sighash_copy();

        if base == SIGHASH_NONE || base == SIGHASH_SINGLE {
            if base == SIGHASH_NONE {
                tx.outputs.clear();
            } else {
                tx.outputs.truncate(in_index + 1);
                for output in tx.outputs.iter_mut().take(in_index) {
                    output.value = OutputValue::Raw([0xff; 8]);
                    output.script.clear();
                }
            }
            for (i, input) in tx.inputs.iter_mut().enumerate() {
                if i != in_index {
                    input.sequence = 0;
                }
            }
        }

        if is_anyone_can_pay(hash_type) {
            let mut input = tx.inputs.swap_remove(in_index);
            input.script = script;
            tx.inputs = vec![input];
        } else {
            for input in tx.inputs.iter_mut() {
                input.script.clear();
            }
            tx.inputs[in_index].script = script;
        }

        let mut preimage = tx.encode(false);
        preimage.extend_from_slice(&hash_type.to_le_bytes());
        Ok(hash256(&preimage))
    }

    /// Copy of the fields the legacy algorithm serializes; shielded data is left empty
    fn legacy_sighash_copy(&self) -> Transaction {
        let mut tx = Transaction::new(self.family);
        tx.version = self.version;
        tx.locktime = self.locktime;
        tx.timestamp = self.timestamp;
        tx.version_group_id = self.version_group_id;
        tx.expiry = self.expiry;
        tx.dash_type = self.dash_type;
        tx.extra_payload = self.extra_payload.clone();
        tx.inputs = self
            .inputs
            .iter()
            .map(|input| TxInput {
                witness: Vec::new(),
                ..input.clone()
            })
            .collect();
        tx.outputs = self.outputs.clone();
        tx
    }

    fn witness_input(&self, in_index: usize) -> Result<&TxInput, PreconditionError> {
        self.inputs
            .get(in_index)
            .ok_or(PreconditionError::InputIndexOutOfRange {
                index: in_index,
                count: self.inputs.len(),
            })
    }

    /// BIP143 signature hash for segregated witness version 0 inputs
    pub fn hash_for_witness_v0(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: u64,
        hash_type: u32,
    ) -> Result<[u8; 32], TxError> {
        if self.is_zcash_transaction() {
            return Err(self.unsupported("hash_for_witness_v0").into());
        }
        let input = self.witness_input(in_index)?;
        let aggregates = Aggregates::compute(self, in_index, hash_type, |_, data| hash256(data));

        let mut writer = Writer::with_capacity(156 + prev_out_script.len());
        writer.write_i32(self.version);
        writer.write_slice(&aggregates.prevouts);
        writer.write_slice(&aggregates.sequence);
        write_outpoint(&mut writer, input);
        writer.write_var_slice(prev_out_script);
        writer.write_u64(value);
        writer.write_u32(input.sequence);
        writer.write_slice(&aggregates.outputs);
        writer.write_u32(self.locktime);
        writer.write_u32(hash_type);

        Ok(hash256(&writer.into_bytes()))
    }

    fn require_overwinter(&self, operation: &'static str) -> Result<(), UnsupportedOperationError> {
        if self.is_overwinter_compatible() {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }

    /// ZIP143 signature hash for Overwinter-compatible Zcash-like transactions
    pub fn hash_for_zip143(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: u64,
        hash_type: u32,
    ) -> Result<[u8; 32], TxError> {
        self.require_overwinter("hash_for_zip143")?;
        let input = self.witness_input(in_index)?;
        let aggregates = Aggregates::compute(self, in_index, hash_type, blake2b_256_personal);

        let joinsplits = if self.joinsplits.is_empty() {
            ZERO_HASH
        } else {
            blake2b_256_personal(JOINSPLITS_PERSONALIZATION, &self.joinsplits_digest_data())
        };

        let mut writer = Writer::with_capacity(220 + prev_out_script.len());
        writer.write_u32(self.version as u32 | OVERWINTERED_FLAG);
        writer.write_u32(self.version_group_id);
        writer.write_slice(&aggregates.prevouts);
        writer.write_slice(&aggregates.sequence);
        writer.write_slice(&aggregates.outputs);
        writer.write_slice(&joinsplits);
        writer.write_u32(self.locktime);
        writer.write_u32(self.expiry);
        writer.write_u32(hash_type);
        write_outpoint(&mut writer, input);
        writer.write_var_slice(prev_out_script);
        writer.write_u64(value);
        writer.write_u32(input.sequence);

        let personalization = sighash_personalization(OVERWINTER_BRANCH_ID);
        Ok(blake2b_256_personal(&personalization, &writer.into_bytes()))
    }

    /// Witness-style signature hash for the transaction's family: ZIP143 for Zcash-like
    /// families, BIP143 otherwise
    pub fn hash_for_witness(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: u64,
        hash_type: u32,
    ) -> Result<[u8; 32], TxError> {
        if self.is_zcash_transaction() {
            self.hash_for_zip143(in_index, prev_out_script, value, hash_type)
        } else {
            self.hash_for_witness_v0(in_index, prev_out_script, value, hash_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::CoinFamily;
    use crate::test_utils::{load_sighash_fixtures, load_transaction_fixture};

    #[test]
    fn test_sighash_fixtures() {
        let fixtures = load_sighash_fixtures();
        for (name, fixture) in fixtures {
            let family = fixture.family();
            let tx = Transaction::from_hex(&fixture.hex, family)
                .unwrap_or_else(|e| panic!("Failed to decode {}: {}", name, e));

            for (i, vector) in fixture.legacy.iter().enumerate() {
                let script = hex::decode(&vector.script).unwrap();
                let hash = tx
                    .hash_for_signature(vector.in_index, &script, vector.hash_type)
                    .unwrap_or_else(|e| panic!("{} legacy #{}: {}", name, i, e));
                assert_eq!(hex::encode(hash), vector.hash, "{} legacy #{}", name, i);
            }

            for (i, vector) in fixture.witness.iter().enumerate() {
                let script = hex::decode(&vector.script).unwrap();
                let value = vector.value.unwrap_or(0);
                let hash = tx
                    .hash_for_witness(vector.in_index, &script, value, vector.hash_type)
                    .unwrap_or_else(|e| panic!("{} witness #{}: {}", name, i, e));
                assert_eq!(hex::encode(hash), vector.hash, "{} witness #{}", name, i);
            }

            // the transaction is unchanged by digest computation
            assert_eq!(tx.to_hex(), fixture.hex, "{} was mutated", name);
        }
    }

    #[test]
    fn test_bip143_native_p2wpkh() {
        let fixture = load_transaction_fixture("btc_segwit");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Bitcoin).unwrap();
        let script = hex::decode("76a9141d0f172a0ecb48aee1be1f2687d2963ae33f71a188ac").unwrap();
        let hash = tx
            .hash_for_witness_v0(1, &script, 600_000_000, SIGHASH_ALL)
            .unwrap();
        assert_eq!(
            hex::encode(hash),
            "c37af31116d1b27caf68aae9e3ac82f1477929014d5b917657d0eb49478cb670"
        );
        assert_eq!(
            tx.hash_for_witness(1, &script, 600_000_000, SIGHASH_ALL).unwrap(),
            hash
        );
    }

    #[test]
    fn test_legacy_known_answer() {
        let fixture = load_transaction_fixture("btc_legacy");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Bitcoin).unwrap();
        let script = hex::decode("76a9141d0f172a0ecb48aee1be1f2687d2963ae33f71a188ac").unwrap();
        let hash = tx.hash_for_signature(0, &script, SIGHASH_ALL).unwrap();
        assert_eq!(
            hex::encode(hash),
            "47194bc3c303a30aa5f78e45c7c2980b3be1284a9d69b1ea9ec0d29aac5f6848"
        );
        assert_eq!(tx.hash_for_signature(0, &script, SIGHASH_ALL).unwrap(), hash);
    }

    #[test]
    fn test_legacy_one() {
        let fixture = load_transaction_fixture("btc_legacy");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Bitcoin).unwrap();
        assert_eq!(
            tx.hash_for_signature(tx.inputs.len(), &[], SIGHASH_ALL),
            Ok(SIGHASH_ONE)
        );

        let mut tx = Transaction::new(CoinFamily::Bitcoin);
        tx.add_input(&[1; 32], 0, None, None).unwrap();
        tx.add_input(&[2; 32], 0, None, None).unwrap();
        tx.add_output(vec![0x51], 1);
        assert_eq!(tx.hash_for_signature(1, &[], SIGHASH_SINGLE), Ok(SIGHASH_ONE));
        assert_ne!(tx.hash_for_signature(0, &[], SIGHASH_SINGLE), Ok(SIGHASH_ONE));
    }

    #[test]
    fn test_legacy_rejects_undecompilable_script() {
        let mut tx = Transaction::new(CoinFamily::Bitcoin);
        tx.add_input(&[1; 32], 0, None, None).unwrap();
        assert!(matches!(
            tx.hash_for_signature(0, &[0x4c], SIGHASH_ALL),
            Err(PreconditionError::UndecompilableScript(_))
        ));
    }

    #[test]
    fn test_code_separators_are_ignored() {
        let fixture = load_transaction_fixture("btc_legacy");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Bitcoin).unwrap();
        let plain = hex::decode("51").unwrap();
        let separated = hex::decode("ab51ab").unwrap();
        assert_eq!(
            tx.hash_for_signature(0, &plain, SIGHASH_ALL),
            tx.hash_for_signature(0, &separated, SIGHASH_ALL)
        );
    }

    #[test]
    fn test_legacy_ignores_shielded_data() {
        let fixture = load_transaction_fixture("zec_v4_sapling_spends");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Zcash).unwrap();
        let mut stripped = tx.clone();
        stripped.spend_descriptions.clear();
        stripped.output_descriptions.clear();
        stripped.value_balance = 0;
        stripped.binding_sig = [0; 64];
        assert_eq!(
            tx.hash_for_signature(0, &[0x51], SIGHASH_ALL),
            stripped.hash_for_signature(0, &[0x51], SIGHASH_ALL)
        );
    }

    #[test]
    fn test_witness_errors() {
        let fixture = load_transaction_fixture("btc_segwit");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Bitcoin).unwrap();
        assert_eq!(
            tx.hash_for_witness_v0(tx.inputs.len(), &[], 0, SIGHASH_ALL),
            Err(TxError::Precondition(PreconditionError::InputIndexOutOfRange {
                index: tx.inputs.len(),
                count: tx.inputs.len()
            }))
        );
        assert!(matches!(
            tx.hash_for_zip143(0, &[], 0, SIGHASH_ALL),
            Err(TxError::UnsupportedOperation(_))
        ));

        let fixture = load_transaction_fixture("zec_v3_overwinter");
        let zec = Transaction::from_hex(&fixture.hex, CoinFamily::Zcash).unwrap();
        assert!(matches!(
            zec.hash_for_witness_v0(0, &[], 0, SIGHASH_ALL),
            Err(TxError::UnsupportedOperation(_))
        ));

        let fixture = load_transaction_fixture("zec_v2_sprout");
        let sprout = Transaction::from_hex(&fixture.hex, CoinFamily::Zcash).unwrap();
        assert!(matches!(
            sprout.hash_for_witness(0, &[], 0, SIGHASH_ALL),
            Err(TxError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_witness_hash_types_differ() {
        let fixture = load_transaction_fixture("ltc_segwit_multi");
        let tx = Transaction::from_hex(&fixture.hex, CoinFamily::Litecoin).unwrap();
        let script = [0x51];
        let hashes: Vec<_> = [1, 2, 3, 0x81, 0x82, 0x83]
            .iter()
            .map(|&t| tx.hash_for_witness(0, &script, 1000, t).unwrap())
            .collect();
        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_sighash_one_constant() {
        assert_eq!(
            hex::encode(SIGHASH_ONE),
            "0100000000000000000000000000000000000000000000000000000000000000"
        );
    }
}
