use crate::encoding::{var_slice_len, varint_len, vector_len};
use crate::zcash::shielded::{
    JOINSPLIT_TRAILER_LEN, OUTPUT_DESCRIPTION_LEN, SPEND_DESCRIPTION_LEN,
};

use super::version::version_header_len;
use super::{Transaction, UnsupportedOperationError};

/// hash, index, sequence
const INPUT_FIXED_LEN: usize = 32 + 4 + 4;
const OUTPUT_VALUE_LEN: usize = 8;

impl Transaction {
    /// Serialized length including witness data
    pub fn byte_length(&self) -> usize {
        self.encoded_len(true)
    }

    pub fn byte_length_no_witness(&self) -> usize {
        self.encoded_len(false)
    }

    /// BIP141 weight: base size × 3 + total size
    pub fn weight(&self) -> usize {
        self.byte_length_no_witness() * 3 + self.byte_length()
    }

    pub fn virtual_size(&self) -> usize {
        self.weight().div_ceil(4)
    }

    pub(crate) fn encoded_len(&self, allow_witness: bool) -> usize {
        if self.is_zcash_transaction() {
            return self.zcash_len();
        }
        let with_witness = self.writes_witness(allow_witness);

        let mut len = version_header_len(self) + self.transparent_len() + 4;
        if with_witness {
            len += 2;
            len += self
                .inputs
                .iter()
                .map(|i| vector_len(&i.witness))
                .sum::<usize>();
        }
        if self.family().capabilities().timestamp {
            len += 4;
        }
        if self.is_dash_special_transaction() {
            len += var_slice_len(self.extra_payload.len());
        }
        len
    }

    fn transparent_len(&self) -> usize {
        varint_len(self.inputs.len() as u64)
            + self
                .inputs
                .iter()
                .map(|i| INPUT_FIXED_LEN + var_slice_len(i.script.len()))
                .sum::<usize>()
            + varint_len(self.outputs.len() as u64)
            + self
                .outputs
                .iter()
                .map(|o| OUTPUT_VALUE_LEN + var_slice_len(o.script.len()))
                .sum::<usize>()
    }

    fn zcash_len(&self) -> usize {
        let mut len = version_header_len(self) + self.transparent_len() + 4;
        if self.is_overwinter_compatible() {
            len += 4;
        }
        if self.is_sapling_compatible() {
            len += 8 + self.spend_descs_len() + self.output_descs_len();
        }
        if self.supports_joinsplits() {
            len += self.joinsplit_section_len();
        }
        if self.has_binding_sig() {
            len += 64;
        }
        len
    }

    fn spend_descs_len(&self) -> usize {
        varint_len(self.spend_descriptions.len() as u64)
            + SPEND_DESCRIPTION_LEN * self.spend_descriptions.len()
    }

    fn output_descs_len(&self) -> usize {
        varint_len(self.output_descriptions.len() as u64)
            + OUTPUT_DESCRIPTION_LEN * self.output_descriptions.len()
    }

    pub(crate) fn joinsplit_section_len(&self) -> usize {
        let mut len = varint_len(self.joinsplits.len() as u64);
        if !self.joinsplits.is_empty() {
            len += self
                .joinsplits
                .iter()
                .map(|js| js.byte_length())
                .sum::<usize>();
            len += JOINSPLIT_TRAILER_LEN;
        }
        len
    }

    fn require_zcash(&self, operation: &'static str) -> Result<(), UnsupportedOperationError> {
        if self.is_zcash_transaction() {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }

    /// Serialized length of a Zcash-like transaction
    pub fn zcash_byte_length(&self) -> Result<usize, UnsupportedOperationError> {
        self.require_zcash("zcash_byte_length")?;
        Ok(self.zcash_len())
    }

    pub fn joinsplit_byte_length(&self) -> Result<usize, UnsupportedOperationError> {
        self.require_zcash("joinsplit_byte_length")?;
        Ok(self.joinsplit_section_len())
    }

    pub fn spend_descs_byte_length(&self) -> Result<usize, UnsupportedOperationError> {
        self.require_zcash("spend_descs_byte_length")?;
        Ok(self.spend_descs_len())
    }

    pub fn output_descs_byte_length(&self) -> Result<usize, UnsupportedOperationError> {
        self.require_zcash("output_descs_byte_length")?;
        Ok(self.output_descs_len())
    }
}
