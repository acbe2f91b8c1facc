//! Zcash shielded components: Sapling spend/output descriptions and Sprout JoinSplits
//!
//! These are carried opaquely: the codec reads and writes them field by field so that the
//! transaction re-encodes bit-exactly, but nothing here validates proofs or signatures.

use crate::encoding::{Reader, Writer};
use crate::transaction::DecodeError;

pub const SPEND_DESCRIPTION_LEN: usize = 32 * 4 + GROTH16_PROOF_LEN + 64;
pub const OUTPUT_DESCRIPTION_LEN: usize =
    32 * 3 + SAPLING_ENC_CIPHERTEXT_LEN + SAPLING_OUT_CIPHERTEXT_LEN + GROTH16_PROOF_LEN;

/// JoinSplit with a PHGR13 proof (transaction versions 2 and 3)
pub const PHGR13_JOINSPLIT_LEN: usize = JOINSPLIT_COMMON_LEN + PHGR13_PROOF_LEN;
/// JoinSplit with a Groth16 proof (transaction version 4)
pub const GROTH16_JOINSPLIT_LEN: usize = JOINSPLIT_COMMON_LEN + GROTH16_PROOF_LEN;

pub const SAPLING_ENC_CIPHERTEXT_LEN: usize = 580;
pub const SAPLING_OUT_CIPHERTEXT_LEN: usize = 80;
pub const GROTH16_PROOF_LEN: usize = 48 + 96 + 48;
pub const PHGR13_PROOF_LEN: usize = 33 * 7 + 65;
pub const NOTE_CIPHERTEXT_LEN: usize = 1 + 8 + 32 + 32 + 512 + 16;
pub const NUM_JS_INPUTS: usize = 2;
pub const NUM_JS_OUTPUTS: usize = 2;

const JOINSPLIT_COMMON_LEN: usize = 8
    + 8
    + 32
    + 32 * NUM_JS_INPUTS
    + 32 * NUM_JS_OUTPUTS
    + 32
    + 32
    + 32 * NUM_JS_INPUTS
    + NOTE_CIPHERTEXT_LEN * NUM_JS_OUTPUTS;

/// Trailer after a non-empty JoinSplit vector: 32-byte pubkey, 64-byte signature
pub const JOINSPLIT_TRAILER_LEN: usize = 32 + 64;

const G1_PREFIX: u8 = 0x02;
const G2_PREFIX: u8 = 0x0a;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendDescription {
    pub cv: [u8; 32],
    pub anchor: [u8; 32],
    pub nullifier: [u8; 32],
    pub rk: [u8; 32],
    pub zkproof: [u8; GROTH16_PROOF_LEN],
    pub spend_auth_sig: [u8; 64],
}

impl SpendDescription {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(SpendDescription {
            cv: reader.read_array()?,
            anchor: reader.read_array()?,
            nullifier: reader.read_array()?,
            rk: reader.read_array()?,
            zkproof: reader.read_array()?,
            spend_auth_sig: reader.read_array()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_slice(&self.cv);
        writer.write_slice(&self.anchor);
        writer.write_slice(&self.nullifier);
        writer.write_slice(&self.rk);
        writer.write_slice(&self.zkproof);
        writer.write_slice(&self.spend_auth_sig);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescription {
    pub cv: [u8; 32],
    pub cmu: [u8; 32],
    pub ephemeral_key: [u8; 32],
    pub enc_ciphertext: [u8; SAPLING_ENC_CIPHERTEXT_LEN],
    pub out_ciphertext: [u8; SAPLING_OUT_CIPHERTEXT_LEN],
    pub zkproof: [u8; GROTH16_PROOF_LEN],
}

impl OutputDescription {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(OutputDescription {
            cv: reader.read_array()?,
            cmu: reader.read_array()?,
            ephemeral_key: reader.read_array()?,
            enc_ciphertext: reader.read_array()?,
            out_ciphertext: reader.read_array()?,
            zkproof: reader.read_array()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_slice(&self.cv);
        writer.write_slice(&self.cmu);
        writer.write_slice(&self.ephemeral_key);
        writer.write_slice(&self.enc_ciphertext);
        writer.write_slice(&self.out_ciphertext);
        writer.write_slice(&self.zkproof);
    }
}

/// Compressed BN254 G1 point: prefix byte `0x02 | y_lsb`, 32-byte x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedG1 {
    pub y_lsb: u8,
    pub x: [u8; 32],
}

/// Compressed BN254 G2 point: prefix byte `0x0a | y_lsb`, 64-byte x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedG2 {
    pub y_lsb: u8,
    pub x: [u8; 64],
}

/// Read a point prefix, which must be `base` or `base | 1`, and return its y parity
fn read_point_prefix(reader: &mut Reader<'_>, base: u8) -> Result<u8, DecodeError> {
    let position = reader.position();
    let prefix = reader.read_u8()?;
    if prefix & !1 != base {
        return Err(DecodeError::InvalidPointPrefix { position, prefix });
    }
    Ok(prefix & 1)
}

impl CompressedG1 {
    fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(CompressedG1 {
            y_lsb: read_point_prefix(reader, G1_PREFIX)?,
            x: reader.read_array()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(G1_PREFIX | self.y_lsb);
        writer.write_slice(&self.x);
    }
}

impl CompressedG2 {
    fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(CompressedG2 {
            y_lsb: read_point_prefix(reader, G2_PREFIX)?,
            x: reader.read_array()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(G2_PREFIX | self.y_lsb);
        writer.write_slice(&self.x);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phgr13Proof {
    pub g_a: CompressedG1,
    pub g_a_prime: CompressedG1,
    pub g_b: CompressedG2,
    pub g_b_prime: CompressedG1,
    pub g_c: CompressedG1,
    pub g_c_prime: CompressedG1,
    pub g_k: CompressedG1,
    pub g_h: CompressedG1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSplitProof {
    Phgr13(Phgr13Proof),
    Groth16 {
        a: [u8; 48],
        b: [u8; 96],
        c: [u8; 48],
    },
}

impl JoinSplitProof {
    fn read(reader: &mut Reader<'_>, groth16: bool) -> Result<Self, DecodeError> {
        if groth16 {
            return Ok(JoinSplitProof::Groth16 {
                a: reader.read_array()?,
                b: reader.read_array()?,
                c: reader.read_array()?,
            });
        }
        Ok(JoinSplitProof::Phgr13(Phgr13Proof {
            g_a: CompressedG1::read(reader)?,
            g_a_prime: CompressedG1::read(reader)?,
            g_b: CompressedG2::read(reader)?,
            g_b_prime: CompressedG1::read(reader)?,
            g_c: CompressedG1::read(reader)?,
            g_c_prime: CompressedG1::read(reader)?,
            g_k: CompressedG1::read(reader)?,
            g_h: CompressedG1::read(reader)?,
        }))
    }

    fn write(&self, writer: &mut Writer) {
        match self {
            JoinSplitProof::Phgr13(p) => {
                p.g_a.write(writer);
                p.g_a_prime.write(writer);
                p.g_b.write(writer);
                p.g_b_prime.write(writer);
                p.g_c.write(writer);
                p.g_c_prime.write(writer);
                p.g_k.write(writer);
                p.g_h.write(writer);
            }
            JoinSplitProof::Groth16 { a, b, c } => {
                writer.write_slice(a);
                writer.write_slice(b);
                writer.write_slice(c);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSplit {
    pub vpub_old: u64,
    pub vpub_new: u64,
    pub anchor: [u8; 32],
    pub nullifiers: [[u8; 32]; NUM_JS_INPUTS],
    pub commitments: [[u8; 32]; NUM_JS_OUTPUTS],
    pub ephemeral_key: [u8; 32],
    pub random_seed: [u8; 32],
    pub macs: [[u8; 32]; NUM_JS_INPUTS],
    pub proof: JoinSplitProof,
    pub ciphertexts: [[u8; NOTE_CIPHERTEXT_LEN]; NUM_JS_OUTPUTS],
}

impl JoinSplit {
    /// `groth16` selects the proof layout; Sapling transactions use Groth16, earlier ones PHGR13.
    pub(crate) fn read(reader: &mut Reader<'_>, groth16: bool) -> Result<Self, DecodeError> {
        Ok(JoinSplit {
            vpub_old: reader.read_u64()?,
            vpub_new: reader.read_u64()?,
            anchor: reader.read_array()?,
            nullifiers: [reader.read_array()?, reader.read_array()?],
            commitments: [reader.read_array()?, reader.read_array()?],
            ephemeral_key: reader.read_array()?,
            random_seed: reader.read_array()?,
            macs: [reader.read_array()?, reader.read_array()?],
            proof: JoinSplitProof::read(reader, groth16)?,
            ciphertexts: [reader.read_array()?, reader.read_array()?],
        })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.vpub_old);
        writer.write_u64(self.vpub_new);
        writer.write_slice(&self.anchor);
        self.nullifiers.iter().for_each(|n| writer.write_slice(n));
        self.commitments.iter().for_each(|c| writer.write_slice(c));
        writer.write_slice(&self.ephemeral_key);
        writer.write_slice(&self.random_seed);
        self.macs.iter().for_each(|m| writer.write_slice(m));
        self.proof.write(writer);
        self.ciphertexts.iter().for_each(|c| writer.write_slice(c));
    }

    pub fn byte_length(&self) -> usize {
        match self.proof {
            JoinSplitProof::Phgr13(_) => PHGR13_JOINSPLIT_LEN,
            JoinSplitProof::Groth16 { .. } => GROTH16_JOINSPLIT_LEN,
        }
    }
}
