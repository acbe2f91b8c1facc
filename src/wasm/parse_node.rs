//! WASM bindings for the transaction inspection tree
//!
//! These bindings are always available but throw at runtime when the `inspect` feature is
//! not enabled.

use wasm_bindgen::prelude::*;

#[cfg(not(feature = "inspect"))]
const FEATURE_NOT_ENABLED_ERROR: &str =
    "inspect feature is not enabled. Rebuild with --features inspect";

#[cfg(feature = "inspect")]
fn parse_network(network_name: &str) -> Result<crate::networks::Network, JsError> {
    crate::networks::Network::from_name(network_name)
        .ok_or_else(|| JsError::new(&format!("Unknown network: {}", network_name)))
}

/// Parse a transaction and return a JSON representation of its structure.
///
/// # Arguments
/// * `tx_bytes` - The raw transaction bytes
/// * `network_name` - Coin name (`btc`, `zec`, ...) or utxo-lib network name (`bitcoin`, ...)
///
/// # Errors
/// Returns an error if:
/// - The `inspect` feature is not enabled
/// - The transaction bytes are invalid
/// - The network name is unknown
#[wasm_bindgen(js_name = parseTxToJson)]
pub fn parse_tx_to_json(tx_bytes: &[u8], network_name: &str) -> Result<String, JsError> {
    #[cfg(feature = "inspect")]
    {
        let network = parse_network(network_name)?;
        let node = crate::parse_node::parse_tx_bytes_with_network(tx_bytes, network)
            .map_err(|e| JsError::new(&e))?;
        serde_json::to_string(&node).map_err(|e| JsError::new(&e.to_string()))
    }

    #[cfg(not(feature = "inspect"))]
    {
        let _ = (tx_bytes, network_name);
        Err(JsError::new(FEATURE_NOT_ENABLED_ERROR))
    }
}

#[wasm_bindgen(js_name = isInspectEnabled)]
pub fn is_inspect_enabled() -> bool {
    cfg!(feature = "inspect")
}
