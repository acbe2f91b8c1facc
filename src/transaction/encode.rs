use crate::encoding::Writer;
use crate::hashes::hash256;

use super::version::write_version_header;
use super::Transaction;

const SEGWIT_MARKER_FLAG: [u8; 2] = [0x00, 0x01];

impl Transaction {
    /// Serialize including witness data when any input has a witness
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode(true)
    }

    pub fn to_bytes_no_witness(&self) -> Vec<u8> {
        self.encode(false)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn writes_witness(&self, allow_witness: bool) -> bool {
        allow_witness && self.family().capabilities().segwit && self.has_witnesses()
    }

    pub(crate) fn encode(&self, allow_witness: bool) -> Vec<u8> {
        let mut writer = Writer::with_capacity(self.encoded_len(allow_witness));
        let with_witness = self.writes_witness(allow_witness);

        write_version_header(self, &mut writer);

        if with_witness {
            writer.write_slice(&SEGWIT_MARKER_FLAG);
        }

        if self.family().capabilities().timestamp {
            writer.write_u32(self.timestamp);
        }

        writer.write_varint(self.inputs.len() as u64);
        for input in &self.inputs {
            writer.write_slice(&input.hash);
            writer.write_u32(input.index);
            writer.write_var_slice(&input.script);
            writer.write_u32(input.sequence);
        }

        writer.write_varint(self.outputs.len() as u64);
        for output in &self.outputs {
            writer.write_slice(&output.value.to_le_bytes());
            writer.write_var_slice(&output.script);
        }

        if with_witness {
            for input in &self.inputs {
                writer.write_vector(&input.witness);
            }
        }

        writer.write_u32(self.locktime);

        if self.is_overwinter_compatible() {
            writer.write_u32(self.expiry);
        }

        if self.is_sapling_compatible() {
            writer.write_i64(self.value_balance);
            writer.write_varint(self.spend_descriptions.len() as u64);
            for spend in &self.spend_descriptions {
                spend.write(&mut writer);
            }
            writer.write_varint(self.output_descriptions.len() as u64);
            for output in &self.output_descriptions {
                output.write(&mut writer);
            }
        }

        if self.supports_joinsplits() {
            self.write_joinsplit_section(&mut writer);
            if self.has_binding_sig() {
                writer.write_slice(&self.binding_sig);
            }
        }

        if self.is_dash_special_transaction() {
            writer.write_var_slice(&self.extra_payload);
        }

        writer.into_bytes()
    }

    /// JoinSplit count, JoinSplits, and the pubkey/signature pair when non-empty
    fn write_joinsplit_section(&self, writer: &mut Writer) {
        writer.write_varint(self.joinsplits.len() as u64);
        for joinsplit in &self.joinsplits {
            joinsplit.write(writer);
        }
        if !self.joinsplits.is_empty() {
            writer.write_slice(&self.joinsplit_pubkey);
            writer.write_slice(&self.joinsplit_sig);
        }
    }

    /// Serialized JoinSplits (without count) followed by the JoinSplit pubkey
    pub(crate) fn joinsplits_digest_data(&self) -> Vec<u8> {
        let len: usize = self.joinsplits.iter().map(|js| js.byte_length()).sum();
        let mut writer = Writer::with_capacity(len + self.joinsplit_pubkey.len());
        for joinsplit in &self.joinsplits {
            joinsplit.write(&mut writer);
        }
        writer.write_slice(&self.joinsplit_pubkey);
        writer.into_bytes()
    }

    /// Double SHA-256 of the serialization without witness data
    pub fn get_hash(&self) -> [u8; 32] {
        hash256(&self.to_bytes_no_witness())
    }

    /// Transaction id: the hash in reversed byte order, as hex
    pub fn get_id(&self) -> String {
        let mut hash = self.get_hash();
        hash.reverse();
        hex::encode(hash)
    }

    /// Family-specific trailing data.
    ///
    /// JoinSplit-supporting Zcash transactions return their serialized JoinSplit section, Dash
    /// special transactions their var-slice payload.
    pub fn extra_data(&self) -> Option<Vec<u8>> {
        if self.supports_joinsplits() {
            let mut writer = Writer::with_capacity(self.joinsplit_section_len());
            self.write_joinsplit_section(&mut writer);
            return Some(writer.into_bytes());
        }
        if self.is_dash_special_transaction() {
            let mut writer = Writer::with_capacity(self.extra_payload.len() + 9);
            writer.write_var_slice(&self.extra_payload);
            return Some(writer.into_bytes());
        }
        None
    }
}
