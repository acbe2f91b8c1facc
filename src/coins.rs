//! Coin family classification
//!
//! Every network this crate understands belongs to exactly one [`CoinFamily`]. The family decides
//! which optional sections of the wire format exist, so it is fixed when a transaction is created
//! and never changes afterwards.

use std::fmt;

/// Wire-format capabilities of a coin family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Segregated witness marker/flag may follow the version
    pub segwit: bool,
    /// Overwinter/Sapling/JoinSplit sections, BLAKE2b signature digests
    pub zcash_like: bool,
    /// Special transaction type packed in the version, payload after the locktime
    pub dash_special: bool,
    /// 4-byte timestamp after the version
    pub timestamp: bool,
}

macro_rules! coin_families {
    ($($variant:ident => $snake:ident, $coin:literal;)*) => {
        /// Closed set of supported coin families
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CoinFamily {
            $($variant,)*
        }

        impl CoinFamily {
            pub const ALL: &'static [CoinFamily] = &[$(CoinFamily::$variant,)*];

            /// Short coin name (`btc`, `zec`, ...)
            pub const fn coin_name(self) -> &'static str {
                match self {
                    $(CoinFamily::$variant => $coin,)*
                }
            }

            pub fn from_coin_name(name: &str) -> Option<CoinFamily> {
                match name {
                    $($coin => Some(CoinFamily::$variant),)*
                    _ => None,
                }
            }

            pastey::paste! {
                $(
                    pub const fn [<is_ $snake>](self) -> bool {
                        matches!(self, CoinFamily::$variant)
                    }
                )*
            }
        }
    };
}

coin_families! {
    Bitcoin => bitcoin, "btc";
    BitcoinCash => bitcoin_cash, "bch";
    BitcoinSV => bitcoin_sv, "bsv";
    BitcoinGold => bitcoin_gold, "btg";
    Litecoin => litecoin, "ltc";
    Zcash => zcash, "zec";
    Komodo => komodo, "kmd";
    Dash => dash, "dash";
    DigiByte => digibyte, "dgb";
    Dogecoin => dogecoin, "doge";
    Namecoin => namecoin, "nmc";
    Vertcoin => vertcoin, "vtc";
    Capricoin => capricoin, "cpc";
}

impl CoinFamily {
    /// Zcash and its forks share the overwintered transaction format
    pub const fn is_zcash_like(self) -> bool {
        self.is_zcash() || self.is_komodo()
    }

    pub const fn capabilities(self) -> Capabilities {
        Capabilities {
            segwit: !self.is_zcash_like(),
            zcash_like: self.is_zcash_like(),
            dash_special: self.is_dash(),
            timestamp: self.is_capricoin(),
        }
    }
}

impl fmt::Display for CoinFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.coin_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_name_round_trip() {
        for &family in CoinFamily::ALL {
            assert_eq!(CoinFamily::from_coin_name(family.coin_name()), Some(family));
        }
        assert_eq!(CoinFamily::from_coin_name("tbtc"), None);
        assert_eq!(CoinFamily::from_coin_name("BTC"), None);
    }

    #[test]
    fn test_exactly_one_family_predicate() {
        for &family in CoinFamily::ALL {
            let predicates = [
                family.is_bitcoin(),
                family.is_bitcoin_cash(),
                family.is_bitcoin_sv(),
                family.is_bitcoin_gold(),
                family.is_litecoin(),
                family.is_zcash(),
                family.is_komodo(),
                family.is_dash(),
                family.is_digibyte(),
                family.is_dogecoin(),
                family.is_namecoin(),
                family.is_vertcoin(),
                family.is_capricoin(),
            ];
            assert_eq!(
                predicates.iter().filter(|&&p| p).count(),
                1,
                "{:?} should match exactly one predicate",
                family
            );
        }
    }

    #[test]
    fn test_capabilities() {
        let zec = CoinFamily::Zcash.capabilities();
        assert!(zec.zcash_like && !zec.segwit && !zec.dash_special && !zec.timestamp);
        assert!(CoinFamily::Komodo.capabilities().zcash_like);
        assert!(CoinFamily::Dash.capabilities().dash_special);
        assert!(CoinFamily::Dash.capabilities().segwit);
        let cpc = CoinFamily::Capricoin.capabilities();
        assert!(cpc.timestamp && cpc.segwit);
        assert_eq!(
            CoinFamily::Litecoin.capabilities(),
            CoinFamily::Bitcoin.capabilities()
        );
    }
}
