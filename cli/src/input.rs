//! Reading transaction bytes from files or stdin

use anyhow::{Context, Result};
use base64::Engine;
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when `path` is `-`
pub fn read_input_bytes(path: &Path, kind: &str) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .with_context(|| format!("Failed to read {} from stdin", kind))?;
        Ok(buf)
    } else {
        std::fs::read(path)
            .with_context(|| format!("Failed to read {} file: {}", kind, path.display()))
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Auto-detect hex, base64, or raw bytes
pub fn decode_input(raw: &[u8]) -> Result<Vec<u8>> {
    if let Ok(text) = std::str::from_utf8(raw) {
        let text = text.trim();
        if is_hex(text) {
            return hex::decode(text).context("Failed to decode hex input");
        }
        if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(text) {
            if !bytes.is_empty() {
                return Ok(bytes);
            }
        }
    }
    Ok(raw.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_input(b"0100ff\n").unwrap(), vec![0x01, 0x00, 0xff]);
    }

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_input(b"AQD/").unwrap(), vec![0x01, 0x00, 0xff]);
    }

    #[test]
    fn test_decode_raw() {
        let raw = vec![0x01, 0x00, 0x00, 0x00, 0xfe];
        assert_eq!(decode_input(&raw).unwrap(), raw);
    }
}
