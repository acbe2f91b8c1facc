mod parse_node;
mod transaction;

pub use parse_node::{is_inspect_enabled, parse_tx_to_json};
pub use transaction::WasmTransaction;
