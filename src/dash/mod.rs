//! Dash special transactions (DIP-2)
//!
//! A version 3 Dash transaction carries a special transaction type in the high 16 bits of the
//! version field; every type other than [`DashTxType::Classic`] appends a var-slice payload after
//! the locktime.

/// Transaction version that introduced special transactions
pub const SPECIAL_TX_VERSION: i32 = 3;

/// Low 16 bits of the version field; the high 16 bits carry the special transaction type
pub const VERSION_MASK: u32 = 0xffff;

/// The part of `version` that fits beside the special transaction type
pub const fn masked_version(version: i32) -> i32 {
    (version as u32 & VERSION_MASK) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashTxType {
    Classic = 0,
    ProviderRegister = 1,
    ProviderUpdateService = 2,
    ProviderUpdateRegistrar = 3,
    ProviderUpdateRevoke = 4,
    Coinbase = 5,
    QuorumCommitment = 6,
}

impl DashTxType {
    pub const ALL: &'static [DashTxType] = &[
        DashTxType::Classic,
        DashTxType::ProviderRegister,
        DashTxType::ProviderUpdateService,
        DashTxType::ProviderUpdateRegistrar,
        DashTxType::ProviderUpdateRevoke,
        DashTxType::Coinbase,
        DashTxType::QuorumCommitment,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            DashTxType::Classic => "classic",
            DashTxType::ProviderRegister => "provider_register",
            DashTxType::ProviderUpdateService => "provider_update_service",
            DashTxType::ProviderUpdateRegistrar => "provider_update_registrar",
            DashTxType::ProviderUpdateRevoke => "provider_update_revoke",
            DashTxType::Coinbase => "coinbase",
            DashTxType::QuorumCommitment => "quorum_commitment",
        }
    }
}

impl TryFrom<u16> for DashTxType {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        DashTxType::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(value)
    }
}

impl From<DashTxType> for u16 {
    fn from(t: DashTxType) -> u16 {
        t as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        for &t in DashTxType::ALL {
            assert_eq!(DashTxType::try_from(u16::from(t)), Ok(t));
        }
        assert_eq!(DashTxType::try_from(7), Err(7));
        assert_eq!(DashTxType::try_from(0xffff), Err(0xffff));
    }
}
