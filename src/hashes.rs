//! Hash primitives used by transaction ids and signature digests

use miniscript::bitcoin::hashes::{sha256d, Hash};

/// Double SHA-256
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256d::Hash::hash(data).to_byte_array()
}

/// BLAKE2b-256 with a 16-byte personalization string
pub fn blake2b_256_personal(personalization: &[u8; 16], data: &[u8]) -> [u8; 32] {
    let hash = blake2b_simd::Params::new()
        .hash_length(32)
        .personal(personalization)
        .hash(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(hash.as_bytes());
    out
}
