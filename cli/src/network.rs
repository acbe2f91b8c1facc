//! Network argument type for CLI commands

use clap::ValueEnum;
use wasm_utxo_tx::Network;

/// CLI argument type for network selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NetworkArg {
    Btc,
    Tbtc,
    Tbtc4,
    Bch,
    Tbch,
    Bsv,
    Tbsv,
    Btg,
    Tbtg,
    Ltc,
    Tltc,
    Zec,
    Tzec,
    Kmd,
    Dash,
    Tdash,
    Dgb,
    Doge,
    Tdoge,
    Nmc,
    Vtc,
    Cpc,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Btc => Network::Bitcoin,
            NetworkArg::Tbtc => Network::BitcoinTestnet3,
            NetworkArg::Tbtc4 => Network::BitcoinTestnet4,
            NetworkArg::Bch => Network::BitcoinCash,
            NetworkArg::Tbch => Network::BitcoinCashTestnet,
            NetworkArg::Bsv => Network::BitcoinSV,
            NetworkArg::Tbsv => Network::BitcoinSVTestnet,
            NetworkArg::Btg => Network::BitcoinGold,
            NetworkArg::Tbtg => Network::BitcoinGoldTestnet,
            NetworkArg::Ltc => Network::Litecoin,
            NetworkArg::Tltc => Network::LitecoinTestnet,
            NetworkArg::Zec => Network::Zcash,
            NetworkArg::Tzec => Network::ZcashTestnet,
            NetworkArg::Kmd => Network::Komodo,
            NetworkArg::Dash => Network::Dash,
            NetworkArg::Tdash => Network::DashTestnet,
            NetworkArg::Dgb => Network::DigiByte,
            NetworkArg::Doge => Network::Dogecoin,
            NetworkArg::Tdoge => Network::DogecoinTestnet,
            NetworkArg::Nmc => Network::Namecoin,
            NetworkArg::Vtc => Network::Vertcoin,
            NetworkArg::Cpc => Network::Capricoin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_names_match_coin_names() {
        for arg in NetworkArg::value_variants() {
            let name = arg
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();
            assert_eq!(Network::from(*arg).to_coin_name(), name);
        }
    }
}
