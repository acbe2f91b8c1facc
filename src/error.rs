use core::fmt;
use wasm_bindgen::prelude::*;

use crate::transaction::{DecodeError, PreconditionError, TxError, UnsupportedOperationError};

#[derive(Debug, Clone)]
pub enum WasmUtxoTxError {
    StringError(String),
}

impl std::error::Error for WasmUtxoTxError {}

impl fmt::Display for WasmUtxoTxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasmUtxoTxError::StringError(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for WasmUtxoTxError {
    fn from(s: &str) -> Self {
        WasmUtxoTxError::StringError(s.to_string())
    }
}

impl From<String> for WasmUtxoTxError {
    fn from(s: String) -> Self {
        WasmUtxoTxError::StringError(s)
    }
}

impl From<DecodeError> for WasmUtxoTxError {
    fn from(err: DecodeError) -> Self {
        WasmUtxoTxError::StringError(format!("Failed to decode transaction: {}", err))
    }
}

impl From<PreconditionError> for WasmUtxoTxError {
    fn from(err: PreconditionError) -> Self {
        WasmUtxoTxError::StringError(err.to_string())
    }
}

impl From<UnsupportedOperationError> for WasmUtxoTxError {
    fn from(err: UnsupportedOperationError) -> Self {
        WasmUtxoTxError::StringError(err.to_string())
    }
}

impl From<TxError> for WasmUtxoTxError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Decode(e) => e.into(),
            other => WasmUtxoTxError::StringError(other.to_string()),
        }
    }
}

impl WasmUtxoTxError {
    pub fn new(s: &str) -> WasmUtxoTxError {
        WasmUtxoTxError::StringError(s.to_string())
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
impl From<WasmUtxoTxError> for JsValue {
    fn from(err: WasmUtxoTxError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decode_error() {
        let err: WasmUtxoTxError = DecodeError::SuperfluousWitness.into();
        assert_eq!(
            err.to_string(),
            "Failed to decode transaction: transaction has superfluous witness data"
        );
    }

    #[test]
    fn test_from_str() {
        let err: WasmUtxoTxError = "test error".into();
        assert_eq!(err.to_string(), "test error");
    }
}
