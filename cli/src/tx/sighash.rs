use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::input::{decode_input, read_input_bytes};
use wasm_utxo_tx::{Network, Transaction};

pub struct SighashArgs {
    pub input: usize,
    pub script: String,
    pub value: Option<u64>,
    pub hash_type: u32,
    pub witness: bool,
}

pub fn compute_sighash(bytes: &[u8], network: Network, args: &SighashArgs) -> Result<[u8; 32]> {
    let tx = Transaction::from_bytes(bytes, network.family())
        .map_err(|e| anyhow::anyhow!("Failed to parse transaction: {}", e))?;
    let script = hex::decode(args.script.trim()).context("Invalid script hex")?;

    let hash = if args.witness {
        let value = args
            .value
            .context("--value is required for witness signature hashes")?;
        tx.hash_for_witness(args.input, &script, value, args.hash_type)?
    } else {
        if args.value.is_some() {
            log::warn!("--value is ignored for legacy signature hashes");
        }
        tx.hash_for_signature(args.input, &script, args.hash_type)?
    };
    Ok(hash)
}

pub fn handle_sighash_command(path: PathBuf, network: Network, args: SighashArgs) -> Result<()> {
    let raw_bytes = read_input_bytes(&path, "transaction")?;
    let bytes = decode_input(&raw_bytes)?;
    log::debug!(
        "computing {} sighash for input {} of a {} transaction",
        if args.witness { "witness" } else { "legacy" },
        args.input,
        network
    );

    let hash = compute_sighash(&bytes, network, &args)?;
    println!("{}", hex::encode(hash));
    Ok(())
}
