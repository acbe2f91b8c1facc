//! Version header packing
//!
//! The 4-byte version field is shared by all families but packed differently:
//! - Zcash-like: high bit is the overwintered flag, set from version 3 on and followed by a
//!   4-byte version group id
//! - Dash: high 16 bits are the special transaction type, low 16 bits the version
//! - everything else: plain signed version

use crate::coins::CoinFamily;
use crate::dash::{masked_version, DashTxType, SPECIAL_TX_VERSION, VERSION_MASK};
use crate::encoding::{Reader, Writer};
use crate::zcash::{OVERWINTERED_FLAG, OVERWINTER_VERSION};

use super::{DecodeError, Transaction};

/// Fields carried by the version header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VersionHeader {
    pub version: i32,
    pub version_group_id: u32,
    pub dash_type: u16,
}

pub(super) fn read_version_header(
    reader: &mut Reader<'_>,
    family: CoinFamily,
) -> Result<VersionHeader, DecodeError> {
    let raw = reader.read_u32()?;
    let mut header = VersionHeader {
        version: raw as i32,
        version_group_id: 0,
        dash_type: 0,
    };

    let capabilities = family.capabilities();
    if capabilities.zcash_like {
        let overwintered = raw & OVERWINTERED_FLAG != 0;
        header.version = (raw & !OVERWINTERED_FLAG) as i32;
        if overwintered != (header.version >= OVERWINTER_VERSION) {
            return Err(DecodeError::MalformedOverwinter {
                version: header.version,
            });
        }
        if overwintered {
            header.version_group_id = reader.read_u32()?;
        }
    } else if capabilities.dash_special {
        header.version = (raw & VERSION_MASK) as i32;
        header.dash_type = (raw >> 16) as u16;
        if header.version == SPECIAL_TX_VERSION && DashTxType::try_from(header.dash_type).is_err()
        {
            return Err(DecodeError::UnsupportedDashType {
                tx_type: header.dash_type,
            });
        }
    }

    Ok(header)
}

pub(super) fn write_version_header(tx: &Transaction, writer: &mut Writer) {
    if tx.is_overwinter_compatible() {
        writer.write_u32(tx.version as u32 | OVERWINTERED_FLAG);
        writer.write_u32(tx.version_group_id);
    } else if tx.family().capabilities().dash_special {
        let version = masked_version(tx.version) as u32;
        writer.write_u32(version | (u32::from(tx.dash_type) << 16));
    } else {
        writer.write_i32(tx.version);
    }
}

pub(super) fn version_header_len(tx: &Transaction) -> usize {
    if tx.is_overwinter_compatible() {
        8
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(hex_header: &str, family: CoinFamily) -> Result<(VersionHeader, usize), DecodeError> {
        let bytes = hex::decode(hex_header).unwrap();
        let mut reader = Reader::new(&bytes);
        read_version_header(&mut reader, family).map(|h| (h, reader.position()))
    }

    #[rstest]
    #[case::zcash_sprout("02000000", 2, 0, 4)]
    #[case::zcash_overwinter("030000807082c403", 3, 0x03C48270, 8)]
    #[case::zcash_sapling("0400008085202f89", 4, 0x892F2085, 8)]
    fn test_zcash_header(
        #[case] header: &str,
        #[case] version: i32,
        #[case] version_group_id: u32,
        #[case] len: usize,
    ) {
        let (h, position) = read(header, CoinFamily::Zcash).unwrap();
        assert_eq!(h.version, version);
        assert_eq!(h.version_group_id, version_group_id);
        assert_eq!(position, len);

        let mut tx = Transaction::new(CoinFamily::Zcash);
        tx.version = version;
        tx.version_group_id = version_group_id;
        let mut writer = Writer::with_capacity(version_header_len(&tx));
        write_version_header(&tx, &mut writer);
        assert_eq!(hex::encode(writer.into_bytes()), header);
    }

    #[rstest]
    #[case::v3_without_flag("03000000")]
    #[case::v4_without_flag("04000000")]
    #[case::v2_with_flag("02000080")]
    fn test_malformed_overwinter(#[case] header: &str) {
        assert!(matches!(
            read(header, CoinFamily::Komodo),
            Err(DecodeError::MalformedOverwinter { .. })
        ));
    }

    #[test]
    fn test_dash_header() {
        let (h, _) = read("03000500", CoinFamily::Dash).unwrap();
        assert_eq!((h.version, h.dash_type), (3, 5));
        assert_eq!(
            read("03000700", CoinFamily::Dash),
            Err(DecodeError::UnsupportedDashType { tx_type: 7 })
        );
        // the type is only validated for version 3
        let (h, _) = read("02000700", CoinFamily::Dash).unwrap();
        assert_eq!((h.version, h.dash_type), (2, 7));

        let mut tx = Transaction::new(CoinFamily::Dash);
        tx.version = 3;
        tx.dash_type = 6;
        let mut writer = Writer::with_capacity(4);
        write_version_header(&tx, &mut writer);
        assert_eq!(hex::encode(writer.into_bytes()), "03000600");
    }

    #[test]
    fn test_dash_version_does_not_overwrite_type() {
        let mut tx = Transaction::new(CoinFamily::Dash);
        tx.version = 0x0001_0003;
        tx.dash_type = 5;
        tx.extra_payload = vec![0xab];
        let mut writer = Writer::with_capacity(4);
        write_version_header(&tx, &mut writer);
        assert_eq!(hex::encode(writer.into_bytes()), "03000500");

        let decoded = Transaction::from_bytes(&tx.to_bytes(), CoinFamily::Dash).unwrap();
        assert_eq!(decoded.version, 3);
        assert_eq!(decoded.dash_type, 5);
        assert_eq!(decoded.extra_payload, vec![0xab]);

        tx.version = -1;
        tx.dash_type = 0;
        let mut writer = Writer::with_capacity(4);
        write_version_header(&tx, &mut writer);
        assert_eq!(hex::encode(writer.into_bytes()), "ffff0000");
    }

    #[test]
    fn test_plain_header_keeps_sign() {
        let (h, _) = read("ffffffff", CoinFamily::Bitcoin).unwrap();
        assert_eq!(h.version, -1);
        let (h, _) = read("03000500", CoinFamily::Litecoin).unwrap();
        assert_eq!(h.version, 0x0005_0003);
    }
}
