pub mod coins;
pub mod dash;
pub mod encoding;
mod error;
pub mod hashes;
mod networks;
#[cfg(feature = "inspect")]
pub mod parse_node;
pub mod script;
#[cfg(test)]
mod test_utils;
pub mod transaction;
pub mod zcash;

// re-export bitcoin from the miniscript crate
pub use ::miniscript::bitcoin;

pub use coins::{Capabilities, CoinFamily};
pub use dash::DashTxType;
pub use error::WasmUtxoTxError;
pub use networks::Network;
pub use transaction::{
    DecodeError, OutputValue, PreconditionError, Transaction, TxError, TxInput, TxOutput,
    UnsupportedOperationError,
};

pub mod wasm;
pub use wasm::WasmTransaction;

/// Crate version and the git commit it was built from
pub fn version_info() -> String {
    format!(
        "{} ({})",
        env!("WASM_UTXO_TX_VERSION"),
        env!("WASM_UTXO_TX_GIT_HASH")
    )
}
