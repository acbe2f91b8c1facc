use anyhow::Result;
use std::path::PathBuf;

use crate::format::{render_tree_with_scheme, ColorScheme};
use crate::input::{decode_input, read_input_bytes};
use wasm_utxo_tx::parse_node::parse_tx_bytes_with_network;
use wasm_utxo_tx::Network;

pub fn handle_parse_command(
    path: PathBuf,
    no_color: bool,
    json: bool,
    network: Network,
) -> Result<()> {
    // Read from file or stdin
    let raw_bytes = read_input_bytes(&path, "transaction")?;

    // Decode input (auto-detect hex, base64, or raw bytes)
    let bytes = decode_input(&raw_bytes)?;
    log::debug!("decoding {} bytes as {}", bytes.len(), network);

    let node = parse_tx_bytes_with_network(&bytes, network)
        .map_err(|e| anyhow::anyhow!("Failed to parse transaction: {}", e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&node)?);
        return Ok(());
    }

    let color_scheme = if no_color {
        ColorScheme::no_color()
    } else {
        ColorScheme::default()
    };

    render_tree_with_scheme(&node, &color_scheme)?;

    Ok(())
}
