mod node;
mod transaction;

pub use node::{Buffer, Node, Primitive};
pub use transaction::{parse_tx_bytes_with_network, tx_to_node};
