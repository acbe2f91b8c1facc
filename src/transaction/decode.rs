use crate::coins::CoinFamily;
use crate::encoding::Reader;
use crate::zcash::shielded::{
    OUTPUT_DESCRIPTION_LEN, PHGR13_JOINSPLIT_LEN, SPEND_DESCRIPTION_LEN,
};
use crate::zcash::{JoinSplit, OutputDescription, SpendDescription};

use super::version::read_version_header;
use super::{DecodeError, OutputValue, Transaction, TxInput, TxOutput};

const SEGWIT_MARKER: u8 = 0x00;
const SEGWIT_FLAG: u8 = 0x01;

/// hash, index, empty script, sequence
const MIN_INPUT_LEN: usize = 32 + 4 + 1 + 4;
/// value, empty script
const MIN_OUTPUT_LEN: usize = 8 + 1;

impl Transaction {
    /// Decode a complete transaction; trailing bytes are an error
    pub fn from_bytes(bytes: &[u8], family: CoinFamily) -> Result<Transaction, DecodeError> {
        Self::decode(bytes, family, false)
    }

    /// Decode without the trailing-data and superfluous-witness checks
    pub fn from_bytes_lenient(
        bytes: &[u8],
        family: CoinFamily,
    ) -> Result<Transaction, DecodeError> {
        Self::decode(bytes, family, true)
    }

    pub fn from_hex(hex: &str, family: CoinFamily) -> Result<Transaction, DecodeError> {
        Self::from_bytes(&hex::decode(hex)?, family)
    }

    fn decode(bytes: &[u8], family: CoinFamily, lenient: bool) -> Result<Transaction, DecodeError> {
        let mut reader = Reader::new(bytes);
        let mut tx = Transaction::new(family);

        let header = read_version_header(&mut reader, family)?;
        tx.version = header.version;
        tx.version_group_id = header.version_group_id;
        tx.dash_type = header.dash_type;

        let mut has_witness_flag = false;
        if family.capabilities().segwit
            && reader.peek(2) == Some(&[SEGWIT_MARKER, SEGWIT_FLAG][..])
        {
            reader.skip(2)?;
            has_witness_flag = true;
        }

        if family.capabilities().timestamp {
            tx.timestamp = reader.read_u32()?;
        }

        tx.inputs = reader.read_vector(MIN_INPUT_LEN, |r| {
            Ok(TxInput {
                hash: r.read_array()?,
                index: r.read_u32()?,
                script: r.read_var_vec()?,
                sequence: r.read_u32()?,
                witness: Vec::new(),
            })
        })?;

        tx.outputs = reader.read_vector(MIN_OUTPUT_LEN, |r| {
            Ok(TxOutput {
                value: OutputValue::Amount(r.read_u64()?),
                script: r.read_var_vec()?,
            })
        })?;

        if has_witness_flag {
            for input in tx.inputs.iter_mut() {
                input.witness = reader.read_vector(1, |r| r.read_var_vec())?;
            }
            if !lenient && !tx.has_witnesses() {
                return Err(DecodeError::SuperfluousWitness);
            }
        }

        tx.locktime = reader.read_u32()?;

        if tx.is_overwinter_compatible() {
            tx.expiry = reader.read_u32()?;
        }

        if tx.is_sapling_compatible() {
            tx.value_balance = reader.read_i64()?;
            tx.spend_descriptions =
                reader.read_vector(SPEND_DESCRIPTION_LEN, SpendDescription::read)?;
            tx.output_descriptions =
                reader.read_vector(OUTPUT_DESCRIPTION_LEN, OutputDescription::read)?;
        }

        if tx.supports_joinsplits() {
            let groth16 = tx.is_sapling_compatible();
            tx.joinsplits =
                reader.read_vector(PHGR13_JOINSPLIT_LEN, |r| JoinSplit::read(r, groth16))?;
            if !tx.joinsplits.is_empty() {
                tx.joinsplit_pubkey = reader.read_array()?;
                tx.joinsplit_sig = reader.read_array()?;
            }
            if tx.has_binding_sig() {
                tx.binding_sig = reader.read_array()?;
            }
        }

        if tx.is_dash_special_transaction() {
            tx.extra_payload = reader.read_var_vec()?;
        }

        if !lenient && !reader.is_empty() {
            return Err(DecodeError::TrailingData {
                position: reader.position(),
                length: bytes.len(),
            });
        }

        Ok(tx)
    }
}
