//! Multi-family UTXO transaction
//!
//! One [`Transaction`] type covers every supported coin family. Family-specific sections
//! (segregated witness, Zcash overwinter/sapling/joinsplit data, Dash special payloads,
//! Capricoin timestamps) are plain fields that are only read and written when the family and
//! version call for them.

mod decode;
mod encode;
mod error;
pub mod sighash;
mod size;
mod version;

pub use error::{DecodeError, PreconditionError, TxError, UnsupportedOperationError};
pub use sighash::{
    SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_MASK, SIGHASH_NONE, SIGHASH_SINGLE,
};

use crate::coins::CoinFamily;
use crate::dash::{masked_version, DashTxType, SPECIAL_TX_VERSION};
use crate::zcash::{
    JoinSplit, OutputDescription, SpendDescription, JOINSPLITS_SUPPORT_VERSION,
    OVERWINTER_VERSION, SAPLING_VERSION, ZCASH_OVERWINTER_VERSION_GROUP_ID,
};

pub const DEFAULT_SEQUENCE: u32 = 0xffffffff;

/// Largest integer a JavaScript number represents exactly
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    /// Previous transaction hash (internal byte order)
    pub hash: [u8; 32],
    pub index: u32,
    pub script: Vec<u8>,
    pub sequence: u32,
    pub witness: Vec<Vec<u8>>,
}

/// Output amount as written on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputValue {
    Amount(u64),
    /// Verbatim 8 bytes; legacy SIGHASH_SINGLE blanks outputs with `ffffffffffffffff`
    Raw([u8; 8]),
}

impl OutputValue {
    pub fn to_le_bytes(self) -> [u8; 8] {
        match self {
            OutputValue::Amount(v) => v.to_le_bytes(),
            OutputValue::Raw(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub value: OutputValue,
    pub script: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    family: CoinFamily,
    /// Version without any family-specific packing (overwintered bit, Dash type)
    pub version: i32,
    pub locktime: u32,
    /// Capricoin only
    pub timestamp: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub version_group_id: u32,
    pub expiry: u32,
    pub value_balance: i64,
    pub spend_descriptions: Vec<SpendDescription>,
    pub output_descriptions: Vec<OutputDescription>,
    pub joinsplits: Vec<JoinSplit>,
    pub joinsplit_pubkey: [u8; 32],
    pub joinsplit_sig: [u8; 64],
    pub binding_sig: [u8; 64],
    pub dash_type: u16,
    pub extra_payload: Vec<u8>,
}

impl Transaction {
    /// Empty transaction with the family's default version
    pub fn new(family: CoinFamily) -> Self {
        let (version, version_group_id) = if family.is_zcash_like() {
            (OVERWINTER_VERSION, ZCASH_OVERWINTER_VERSION_GROUP_ID)
        } else {
            (1, 0)
        };
        Transaction {
            family,
            version,
            locktime: 0,
            timestamp: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
            version_group_id,
            expiry: 0,
            value_balance: 0,
            spend_descriptions: Vec::new(),
            output_descriptions: Vec::new(),
            joinsplits: Vec::new(),
            joinsplit_pubkey: [0; 32],
            joinsplit_sig: [0; 64],
            binding_sig: [0; 64],
            dash_type: 0,
            extra_payload: Vec::new(),
        }
    }

    pub fn family(&self) -> CoinFamily {
        self.family
    }

    pub fn is_zcash_transaction(&self) -> bool {
        self.family.capabilities().zcash_like
    }

    pub fn is_overwinter_compatible(&self) -> bool {
        self.is_zcash_transaction() && self.version >= OVERWINTER_VERSION
    }

    pub fn is_sapling_compatible(&self) -> bool {
        self.is_zcash_transaction() && self.version >= SAPLING_VERSION
    }

    pub fn supports_joinsplits(&self) -> bool {
        self.is_zcash_transaction() && self.version >= JOINSPLITS_SUPPORT_VERSION
    }

    pub fn is_dash_special_transaction(&self) -> bool {
        self.family.capabilities().dash_special
            && masked_version(self.version) == SPECIAL_TX_VERSION
            && self.dash_type != 0
    }

    /// Binding signature is present when the transaction has any Sapling spend or output
    pub(crate) fn has_binding_sig(&self) -> bool {
        self.is_sapling_compatible()
            && !(self.spend_descriptions.is_empty() && self.output_descriptions.is_empty())
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> UnsupportedOperationError {
        UnsupportedOperationError {
            operation,
            family: self.family,
            version: self.version,
        }
    }

    /// Append an input and return its index.
    ///
    /// `sequence` defaults to [`DEFAULT_SEQUENCE`], `script` to an empty script.
    pub fn add_input(
        &mut self,
        hash: &[u8],
        index: u32,
        sequence: Option<u32>,
        script: Option<Vec<u8>>,
    ) -> Result<usize, PreconditionError> {
        let hash: [u8; 32] =
            hash.try_into()
                .map_err(|_| PreconditionError::InvalidHashLength {
                    expected: 32,
                    actual: hash.len(),
                })?;
        self.inputs.push(TxInput {
            hash,
            index,
            script: script.unwrap_or_default(),
            sequence: sequence.unwrap_or(DEFAULT_SEQUENCE),
            witness: Vec::new(),
        });
        Ok(self.inputs.len() - 1)
    }

    /// Append an output and return its index
    pub fn add_output(&mut self, script: Vec<u8>, value: u64) -> usize {
        self.outputs.push(TxOutput {
            value: OutputValue::Amount(value),
            script,
        });
        self.outputs.len() - 1
    }

    fn input_mut(&mut self, index: usize) -> Result<&mut TxInput, PreconditionError> {
        let count = self.inputs.len();
        self.inputs
            .get_mut(index)
            .ok_or(PreconditionError::InputIndexOutOfRange { index, count })
    }

    pub fn set_input_script(
        &mut self,
        index: usize,
        script: Vec<u8>,
    ) -> Result<(), PreconditionError> {
        self.input_mut(index)?.script = script;
        Ok(())
    }

    pub fn set_witness(
        &mut self,
        index: usize,
        witness: Vec<Vec<u8>>,
    ) -> Result<(), PreconditionError> {
        self.input_mut(index)?.witness = witness;
        Ok(())
    }

    pub fn has_witnesses(&self) -> bool {
        self.inputs.iter().any(|i| !i.witness.is_empty())
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && is_coinbase_hash(&self.inputs[0].hash)
    }

    /// Payload of a Dash special transaction
    pub fn dash_payload(&self) -> Option<&[u8]> {
        self.is_dash_special_transaction()
            .then_some(self.extra_payload.as_slice())
    }

    /// Turn this Dash transaction into a special transaction of `tx_type` carrying `payload`
    pub fn set_dash_payload(
        &mut self,
        tx_type: DashTxType,
        payload: Vec<u8>,
    ) -> Result<(), UnsupportedOperationError> {
        if !self.family.is_dash() {
            return Err(self.unsupported("set_dash_payload"));
        }
        self.version = SPECIAL_TX_VERSION;
        self.dash_type = tx_type.into();
        self.extra_payload = payload;
        Ok(())
    }
}

/// A coinbase input spends the all-zero hash
pub fn is_coinbase_hash(hash: &[u8]) -> bool {
    hash.len() == 32 && hash.iter().all(|&b| b == 0)
}

/// Convert a floating point satoshi amount, rejecting values a JavaScript caller could not
/// have meant exactly
pub fn satoshis_from_f64(value: f64) -> Result<u64, PreconditionError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SAFE_INTEGER {
        return Err(PreconditionError::InvalidAmount { value });
    }
    Ok(value as u64)
}

pub fn u32_from_f64(field: &'static str, value: f64) -> Result<u32, PreconditionError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(PreconditionError::NotUInt32 { field, value });
    }
    Ok(value as u32)
}
