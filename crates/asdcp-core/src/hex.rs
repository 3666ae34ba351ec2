//! Hex encode/decode helpers for keys and identifiers on the CLI surface.

use crate::{Error, Result};

/// Encode `data` as lowercase hex.
pub fn bin2hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for b in data {
        use std::fmt::Write;
        write!(out, "{b:02x}").expect("writing to a String cannot fail");
    }
    out
}

/// Decode a hex string of exactly `N` bytes. Whitespace and ASCII dashes
/// are ignored so UUID notation is accepted.
pub fn hex2bin<const N: usize>(text: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    let mut nibbles = 0usize;

    for c in text.chars() {
        if c.is_ascii_whitespace() || c == '-' || c == '.' {
            continue;
        }
        let v = c
            .to_digit(16)
            .ok_or_else(|| Error::Format(format!("invalid hex character {c:?}")))?
            as u8;
        if nibbles >= N * 2 {
            return Err(Error::Format(format!("hex value longer than {N} bytes")));
        }
        let byte = &mut out[nibbles / 2];
        *byte = (*byte << 4) | v;
        nibbles += 1;
    }

    if nibbles != N * 2 {
        return Err(Error::Format(format!("expected {} hex digits, got {nibbles}", N * 2)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let key: [u8; 16] = hex2bin("00112233445566778899AABBCCDDEEFF").unwrap();
        assert_eq!(bin2hex(&key), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn uuid_punctuation_accepted() {
        let id: [u8; 16] = hex2bin("00112233-4455-6677-8899-aabbccddeeff").unwrap();
        assert_eq!(id[0], 0x00);
        assert_eq!(id[15], 0xff);
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(hex2bin::<16>("00ff").is_err());
        assert!(hex2bin::<1>("012").is_err());
        assert!(hex2bin::<2>("zzzz").is_err());
    }
}
