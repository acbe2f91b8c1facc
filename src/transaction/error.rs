//! Error types for transaction decoding, construction and digest computation

use thiserror::Error;

use crate::coins::CoinFamily;

/// Failure while decoding a serialized transaction.
///
/// Positions are byte offsets into the input buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {position}: needed {needed} bytes, {available} available")]
    UnexpectedEnd {
        position: usize,
        needed: usize,
        available: usize,
    },
    #[error("non-canonical varint at offset {position}")]
    NonCanonicalVarInt { position: usize },
    #[error("malformed overwinter header for zcash tx version {version}")]
    MalformedOverwinter { version: i32 },
    #[error("unsupported Dash transaction type {tx_type}")]
    UnsupportedDashType { tx_type: u16 },
    #[error("invalid compressed point prefix {prefix:#04x} at offset {position}")]
    InvalidPointPrefix { position: usize, prefix: u8 },
    #[error("transaction has superfluous witness data")]
    SuperfluousWitness,
    #[error("transaction has unexpected data: decoded {position} of {length} bytes")]
    TrailingData { position: usize, length: usize },
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A caller-supplied argument violates the operation's contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    #[error("expected a {expected}-byte hash, got {actual} bytes")]
    InvalidHashLength { expected: usize, actual: usize },
    #[error("{field} is not a valid uint32: {value}")]
    NotUInt32 { field: &'static str, value: f64 },
    #[error("invalid satoshi amount: {value}")]
    InvalidAmount { value: f64 },
    #[error("input index {index} out of range ({count} inputs)")]
    InputIndexOutOfRange { index: usize, count: usize },
    #[error("cannot decompile script: {0}")]
    UndecompilableScript(String),
}

/// The operation does not apply to this transaction's family or version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} is not supported for {family} transactions (version {version})")]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
    pub family: CoinFamily,
    pub version: i32,
}

/// Umbrella error for APIs that can fail in more than one way
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TxError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperationError),
}
