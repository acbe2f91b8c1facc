//! Zcash transaction format parameters
//!
//! Version thresholds, the Overwinter version group id and the consensus branch id used by
//! ZIP143 signature digests.
//!
//! References:
//! - <https://zips.z.cash/zip-0202>
//! - <https://zips.z.cash/zip-0143>

pub mod shielded;

pub use shielded::{
    CompressedG1, CompressedG2, JoinSplit, JoinSplitProof, OutputDescription, Phgr13Proof,
    SpendDescription,
};

/// First version carrying JoinSplits
pub const JOINSPLITS_SUPPORT_VERSION: i32 = 2;
/// First overwintered version
pub const OVERWINTER_VERSION: i32 = 3;
/// First version with Sapling fields
pub const SAPLING_VERSION: i32 = 4;

/// Zcash Overwinter version group ID
pub const ZCASH_OVERWINTER_VERSION_GROUP_ID: u32 = 0x03C48270;

/// High bit of the header marks an overwintered transaction
pub const OVERWINTERED_FLAG: u32 = 0x8000_0000;

/// Overwinter consensus branch id, committed to by ZIP143 digests
pub const OVERWINTER_BRANCH_ID: u32 = 0x5ba81b19;

/// Signature hash personalization: `ZcashSigHash` followed by the branch id
pub fn sighash_personalization(branch_id: u32) -> [u8; 16] {
    let mut personal = [0u8; 16];
    personal[..12].copy_from_slice(b"ZcashSigHash");
    personal[12..].copy_from_slice(&branch_id.to_le_bytes());
    personal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwinter_personalization() {
        assert_eq!(
            hex::encode(sighash_personalization(OVERWINTER_BRANCH_ID)),
            format!("{}191ba85b", hex::encode("ZcashSigHash"))
        );
    }
}
