//! Bounds-checked little-endian reader and writer
//!
//! Varints use Bitcoin's CompactSize encoding via [`VarInt`]. The reader rejects non-minimal
//! encodings so that every decoded transaction re-encodes to the same bytes.

use miniscript::bitcoin::consensus::{self, encode, Decodable};
use miniscript::bitcoin::VarInt;

use crate::transaction::DecodeError;

/// Encoded length of `n` as a varint
pub fn varint_len(n: u64) -> usize {
    VarInt(n).size()
}

/// Encoded length of a varint length prefix followed by `len` bytes
pub fn var_slice_len(len: usize) -> usize {
    varint_len(len as u64) + len
}

/// Encoded length of a vector of var-slices (witness stack)
pub fn vector_len(items: &[Vec<u8>]) -> usize {
    varint_len(items.len() as u64) + items.iter().map(|i| var_slice_len(i.len())).sum::<usize>()
}

pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look ahead without advancing; `None` if fewer than `n` bytes remain
    pub fn peek(&self, n: usize) -> Option<&'a [u8]> {
        self.bytes.get(self.position..self.position.checked_add(n)?)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_slice(n).map(|_| ())
    }

    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let slice = self.peek(n).ok_or(DecodeError::UnexpectedEnd {
            position: self.position,
            needed: n,
            available: self.remaining(),
        })?;
        self.position += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_slice(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.position;
        let width = match self.peek(1) {
            Some([0xfd]) => 3,
            Some([0xfe]) => 5,
            Some([0xff]) => 9,
            _ => 1,
        };
        let mut encoded = self.read_slice(width)?;
        VarInt::consensus_decode(&mut encoded)
            .map(|v| v.0)
            .map_err(|e| match e {
                encode::Error::NonMinimalVarInt => {
                    DecodeError::NonCanonicalVarInt { position: start }
                }
                _ => DecodeError::UnexpectedEnd {
                    position: start,
                    needed: width,
                    available: self.bytes.len() - start,
                },
            })
    }

    pub fn read_var_slice(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_len()?;
        self.read_slice(len)
    }

    pub fn read_var_vec(&mut self) -> Result<Vec<u8>, DecodeError> {
        self.read_var_slice().map(<[u8]>::to_vec)
    }

    /// Read a varint count followed by that many items.
    ///
    /// `min_item_len` bounds the up-front allocation by what the remaining input can hold.
    pub fn read_vector<T>(
        &mut self,
        min_item_len: usize,
        mut read_item: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.read_len()?;
        let mut items = Vec::with_capacity(count.min(self.remaining() / min_item_len.max(1)));
        for _ in 0..count {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    fn read_len(&mut self) -> Result<usize, DecodeError> {
        let start = self.position;
        let n = self.read_varint()?;
        usize::try_from(n).map_err(|_| DecodeError::UnexpectedEnd {
            position: start,
            needed: usize::MAX,
            available: self.remaining(),
        })
    }
}

pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.write_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_slice(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.write_slice(&v.to_le_bytes());
    }

    pub fn write_varint(&mut self, n: u64) {
        self.write_slice(&consensus::serialize(&VarInt(n)));
    }

    pub fn write_var_slice(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_slice(bytes);
    }

    pub fn write_vector(&mut self, items: &[Vec<u8>]) {
        self.write_varint(items.len() as u64);
        for item in items {
            self.write_var_slice(item);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00")]
    #[case(0xfc, "fc")]
    #[case(0xfd, "fdfd00")]
    #[case(0xffff, "fdffff")]
    #[case(0x10000, "fe00000100")]
    #[case(0xffff_ffff, "feffffffff")]
    #[case(0x1_0000_0000, "ff0000000001000000")]
    fn test_varint(#[case] n: u64, #[case] encoded: &str) {
        let mut writer = Writer::with_capacity(varint_len(n));
        writer.write_varint(n);
        assert_eq!(writer.len(), varint_len(n));
        assert_eq!(hex::encode(writer.into_bytes()), encoded);

        let bytes = hex::decode(encoded).unwrap();
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_varint().unwrap(), n);
        assert!(reader.is_empty());
    }

    #[rstest]
    #[case("fd0100")]
    #[case("fdfc00")]
    #[case("feffff0000")]
    #[case("ffffffffff00000000")]
    fn test_non_canonical_varint(#[case] encoded: &str) {
        let bytes = hex::decode(format!("aa{}", encoded)).unwrap();
        let mut reader = Reader::new(&bytes);
        reader.skip(1).unwrap();
        assert_eq!(
            reader.read_varint(),
            Err(DecodeError::NonCanonicalVarInt { position: 1 })
        );
    }

    #[test]
    fn test_truncated_reads() {
        let bytes = [0xfd, 0x01];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            reader.read_varint(),
            Err(DecodeError::UnexpectedEnd {
                position: 0,
                needed: 3,
                available: 2
            })
        );
        assert_eq!(reader.position(), 0);

        let mut reader = Reader::new(&[1, 2, 3]);
        assert!(reader.read_u32().is_err());
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(
            reader.read_var_slice(),
            Err(DecodeError::UnexpectedEnd {
                position: 2,
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_read_vector_with_huge_count_does_not_preallocate() {
        let bytes = hex::decode("ffffffffffffffff7f").unwrap();
        let mut reader = Reader::new(&bytes);
        assert!(reader.read_vector(32, |r| r.read_array::<32>()).is_err());
    }

    #[test]
    fn test_fixed_width_little_endian() {
        let mut writer = Writer::with_capacity(0);
        writer.write_u32(0x0403_0201);
        writer.write_i32(-1);
        writer.write_i64(-2);
        writer.write_var_slice(&[0xaa, 0xbb]);
        writer.write_vector(&[vec![], vec![0xcc]]);
        let bytes = writer.into_bytes();
        assert_eq!(
            hex::encode(&bytes),
            "01020304fffffffffeffffffffffffff02aabb020001cc"
        );
        assert_eq!(vector_len(&[vec![], vec![0xcc]]), 4);

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.read_i64().unwrap(), -2);
        assert_eq!(reader.read_var_vec().unwrap(), vec![0xaa, 0xbb]);
        let items = reader.read_vector(1, |r| r.read_var_vec()).unwrap();
        assert_eq!(items, vec![vec![], vec![0xcc]]);
        assert!(reader.is_empty());
    }
}
