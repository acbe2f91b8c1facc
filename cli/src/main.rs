use anyhow::Result;
use clap::{Parser, Subcommand};

mod format;
mod input;
mod network;
mod tx;

#[derive(Parser)]
#[command(name = "wasm-utxo-tx-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect UTXO transactions and compute signature hashes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction operations
    Tx {
        #[command(subcommand)]
        command: tx::TxCommand,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("wasm-utxo-tx {}", wasm_utxo_tx::version_info());

    match cli.command {
        Commands::Tx { command } => tx::handle_command(command),
    }
}
