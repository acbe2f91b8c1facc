use anyhow::Result;
use clap::Subcommand;

use crate::network::NetworkArg;

mod parse;
pub mod sighash;

#[derive(Subcommand)]
pub enum TxCommand {
    /// Parse a transaction file and display its contents
    Parse {
        /// Path to the transaction file (use '-' to read from stdin)
        path: std::path::PathBuf,
        /// Network selecting the wire format
        #[arg(long, short, value_enum)]
        network: NetworkArg,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the signature hash of one input
    Sighash {
        /// Path to the transaction file (use '-' to read from stdin)
        path: std::path::PathBuf,
        /// Network selecting the wire format
        #[arg(long, short, value_enum)]
        network: NetworkArg,
        /// Index of the input being signed
        #[arg(long, short)]
        input: usize,
        /// Script being signed (hex)
        #[arg(long, short)]
        script: String,
        /// Value of the spent output in satoshis (witness digests only)
        #[arg(long)]
        value: Option<u64>,
        /// Signature hash type
        #[arg(long, default_value_t = 1)]
        hash_type: u32,
        /// Use the witness-style digest (BIP143, or ZIP143 on Zcash-like networks)
        #[arg(long)]
        witness: bool,
    },
}

pub fn handle_command(command: TxCommand) -> Result<()> {
    match command {
        TxCommand::Parse {
            path,
            network,
            no_color,
            json,
        } => parse::handle_parse_command(path, no_color, json, network.into()),
        TxCommand::Sighash {
            path,
            network,
            input,
            script,
            value,
            hash_type,
            witness,
        } => sighash::handle_sighash_command(
            path,
            network.into(),
            sighash::SighashArgs {
                input,
                script,
                value,
                hash_type,
                witness,
            },
        ),
    }
}
