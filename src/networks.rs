//! Network descriptors
//!
//! A [`Network`] names a concrete chain (mainnet or testnet). Networks are looked up either by
//! BitGo coin name (`btc`, `tbtc`, `zec`, ...) or by utxo-lib network name (`bitcoin`,
//! `testnet`, `zcash`, ...). Transaction encoding only depends on the network's [`CoinFamily`].

use crate::coins::CoinFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    BitcoinTestnet3,
    BitcoinTestnet4,
    BitcoinCash,
    BitcoinCashTestnet,
    BitcoinSV,
    BitcoinSVTestnet,
    BitcoinGold,
    BitcoinGoldTestnet,
    Litecoin,
    LitecoinTestnet,
    Zcash,
    ZcashTestnet,
    Komodo,
    Dash,
    DashTestnet,
    DigiByte,
    Dogecoin,
    DogecoinTestnet,
    Namecoin,
    Vertcoin,
    Capricoin,
}

impl Network {
    pub const ALL: &'static [Network] = &[
        Network::Bitcoin,
        Network::BitcoinTestnet3,
        Network::BitcoinTestnet4,
        Network::BitcoinCash,
        Network::BitcoinCashTestnet,
        Network::BitcoinSV,
        Network::BitcoinSVTestnet,
        Network::BitcoinGold,
        Network::BitcoinGoldTestnet,
        Network::Litecoin,
        Network::LitecoinTestnet,
        Network::Zcash,
        Network::ZcashTestnet,
        Network::Komodo,
        Network::Dash,
        Network::DashTestnet,
        Network::DigiByte,
        Network::Dogecoin,
        Network::DogecoinTestnet,
        Network::Namecoin,
        Network::Vertcoin,
        Network::Capricoin,
    ];

    pub const fn family(self) -> CoinFamily {
        match self {
            Network::Bitcoin | Network::BitcoinTestnet3 | Network::BitcoinTestnet4 => {
                CoinFamily::Bitcoin
            }
            Network::BitcoinCash | Network::BitcoinCashTestnet => CoinFamily::BitcoinCash,
            Network::BitcoinSV | Network::BitcoinSVTestnet => CoinFamily::BitcoinSV,
            Network::BitcoinGold | Network::BitcoinGoldTestnet => CoinFamily::BitcoinGold,
            Network::Litecoin | Network::LitecoinTestnet => CoinFamily::Litecoin,
            Network::Zcash | Network::ZcashTestnet => CoinFamily::Zcash,
            Network::Komodo => CoinFamily::Komodo,
            Network::Dash | Network::DashTestnet => CoinFamily::Dash,
            Network::DigiByte => CoinFamily::DigiByte,
            Network::Dogecoin | Network::DogecoinTestnet => CoinFamily::Dogecoin,
            Network::Namecoin => CoinFamily::Namecoin,
            Network::Vertcoin => CoinFamily::Vertcoin,
            Network::Capricoin => CoinFamily::Capricoin,
        }
    }

    pub const fn to_coin_name(self) -> &'static str {
        match self {
            Network::Bitcoin => "btc",
            Network::BitcoinTestnet3 => "tbtc",
            Network::BitcoinTestnet4 => "tbtc4",
            Network::BitcoinCash => "bch",
            Network::BitcoinCashTestnet => "tbch",
            Network::BitcoinSV => "bsv",
            Network::BitcoinSVTestnet => "tbsv",
            Network::BitcoinGold => "btg",
            Network::BitcoinGoldTestnet => "tbtg",
            Network::Litecoin => "ltc",
            Network::LitecoinTestnet => "tltc",
            Network::Zcash => "zec",
            Network::ZcashTestnet => "tzec",
            Network::Komodo => "kmd",
            Network::Dash => "dash",
            Network::DashTestnet => "tdash",
            Network::DigiByte => "dgb",
            Network::Dogecoin => "doge",
            Network::DogecoinTestnet => "tdoge",
            Network::Namecoin => "nmc",
            Network::Vertcoin => "vtc",
            Network::Capricoin => "cpc",
        }
    }

    pub const fn to_utxolib_name(self) -> &'static str {
        match self {
            Network::Bitcoin => "bitcoin",
            Network::BitcoinTestnet3 => "testnet",
            Network::BitcoinTestnet4 => "bitcoinTestnet4",
            Network::BitcoinCash => "bitcoincash",
            Network::BitcoinCashTestnet => "bitcoincashTestnet",
            Network::BitcoinSV => "bitcoinsv",
            Network::BitcoinSVTestnet => "bitcoinsvTestnet",
            Network::BitcoinGold => "bitcoingold",
            Network::BitcoinGoldTestnet => "bitcoingoldTestnet",
            Network::Litecoin => "litecoin",
            Network::LitecoinTestnet => "litecoinTest",
            Network::Zcash => "zcash",
            Network::ZcashTestnet => "zcashTest",
            Network::Komodo => "komodo",
            Network::Dash => "dash",
            Network::DashTestnet => "dashTest",
            Network::DigiByte => "digibyte",
            Network::Dogecoin => "dogecoin",
            Network::DogecoinTestnet => "dogecoinTest",
            Network::Namecoin => "namecoin",
            Network::Vertcoin => "vertcoin",
            Network::Capricoin => "capricoin",
        }
    }

    pub fn from_coin_name(name: &str) -> Option<Network> {
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.to_coin_name() == name)
    }

    pub fn from_utxolib_name(name: &str) -> Option<Network> {
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.to_utxolib_name() == name)
    }

    /// Accept either naming scheme
    pub fn from_name(name: &str) -> Option<Network> {
        Network::from_coin_name(name).or_else(|| Network::from_utxolib_name(name))
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_coin_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_round_trip() {
        for &network in Network::ALL {
            assert_eq!(Network::from_coin_name(network.to_coin_name()), Some(network));
            assert_eq!(
                Network::from_utxolib_name(network.to_utxolib_name()),
                Some(network)
            );
        }
    }

    #[test]
    fn test_from_name_accepts_both_schemes() {
        assert_eq!(Network::from_name("tzec"), Some(Network::ZcashTestnet));
        assert_eq!(Network::from_name("zcashTest"), Some(Network::ZcashTestnet));
        assert_eq!(Network::from_name("dash"), Some(Network::Dash));
        assert_eq!(Network::from_name("unknown"), None);
    }

    #[test]
    fn test_every_family_has_a_mainnet() {
        for &family in CoinFamily::ALL {
            let mainnet = Network::from_coin_name(family.coin_name())
                .unwrap_or_else(|| panic!("no network named {}", family.coin_name()));
            assert_eq!(mainnet.family(), family);
        }
    }
}
