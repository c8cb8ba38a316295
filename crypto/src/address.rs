//! Text address codec for 32-byte public keys.
//!
//! Address format: unpadded RFC 4648 base32 of `public_key || checksum`,
//! where the checksum is the last 4 bytes of SHA-512/256(public_key).
//! Total address length: ceil((32 + 4) * 8 / 5) = 58 characters.

use lumen_types::PublicKey;
use thiserror::Error;

/// RFC 4648 base32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Length of an encoded address in characters.
pub const ADDRESS_LEN: usize = 58;
/// Length of the appended checksum in bytes.
const CHECKSUM_LEN: usize = 4;

/// Errors arising from address text decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("wrong address length: expected {ADDRESS_LEN} characters, got {0}")]
    InvalidAddressLength(usize),

    #[error("address contains a character outside the base32 alphabet")]
    InvalidCharacter,

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Encode a byte slice as unpadded base32.
pub fn base32_encode(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string into a fixed-size byte array, dropping any
/// trailing sub-byte bits. Returns `None` on invalid characters or when
/// fewer than `N` bytes are recovered. Zero-allocation.
fn base32_decode_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

/// Encode a public key as a 58-character checksum-protected address.
pub fn encode_address(public: &PublicKey) -> String {
    let checksum = &crate::digest(public.as_bytes())[32 - CHECKSUM_LEN..];
    let mut body = [0u8; 32 + CHECKSUM_LEN];
    body[..32].copy_from_slice(public.as_bytes());
    body[32..].copy_from_slice(checksum);
    base32_encode(&body)
}

/// Decode an address back to its public key, verifying the checksum.
pub fn decode_address(address: &str) -> Result<PublicKey, AddressError> {
    if address.len() != ADDRESS_LEN {
        return Err(AddressError::InvalidAddressLength(address.len()));
    }

    let decoded: [u8; 32 + CHECKSUM_LEN] =
        base32_decode_fixed(address).ok_or(AddressError::InvalidCharacter)?;

    let mut public = [0u8; 32];
    public.copy_from_slice(&decoded[..32]);

    let expected = &crate::digest(&public)[32 - CHECKSUM_LEN..];
    if decoded[32..] != *expected {
        return Err(AddressError::ChecksumMismatch);
    }

    Ok(PublicKey(public))
}

/// Validate that an address string is well-formed with a correct checksum.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn encode_and_validate() {
        let kp = generate_keypair();
        let addr = encode_address(&kp.public);
        assert_eq!(addr.len(), ADDRESS_LEN);
        assert!(is_valid_address(&addr));
    }

    #[test]
    fn zero_seed_known_address() {
        let kp = keypair_from_seed(&[0u8; 32]);
        assert_eq!(
            encode_address(&kp.public),
            "HNVCPPGOW2SC2YVDVDICU3YNONSTEFLXDXREHJR2YBEKDC2Z3IUZSC6YGI"
        );
    }

    #[test]
    fn decode_roundtrip() {
        let kp = generate_keypair();
        let addr = encode_address(&kp.public);
        let decoded = decode_address(&addr).unwrap();
        assert_eq!(decoded, kp.public);
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let kp = generate_keypair();
        let addr = encode_address(&kp.public);
        // Flip a character squarely inside the checksum region (the final
        // character also carries padding bits that decoding drops).
        let mut chars: Vec<char> = addr.chars().collect();
        chars[53] = if chars[53] == 'A' { 'B' } else { 'A' };
        let bad: String = chars.into_iter().collect();
        assert_eq!(decode_address(&bad), Err(AddressError::ChecksumMismatch));
    }

    #[test]
    fn wrong_length_rejected() {
        assert_eq!(
            decode_address("TOOSHORT"),
            Err(AddressError::InvalidAddressLength(8))
        );
        assert!(!is_valid_address(""));
    }

    #[test]
    fn invalid_character_rejected() {
        let kp = generate_keypair();
        let addr = encode_address(&kp.public);
        let bad = format!("1{}", &addr[1..]);
        assert_eq!(decode_address(&bad), Err(AddressError::InvalidCharacter));
    }

    #[test]
    fn base32_known_vector() {
        assert_eq!(base32_encode(&[42u8; 32]).len(), 52);
        assert_eq!(
            base32_encode(&[42u8; 32]),
            "FIVCUKRKFIVCUKRKFIVCUKRKFIVCUKRKFIVCUKRKFIVCUKRKFIVA"
        );
    }

    #[test]
    fn different_keys_different_addresses() {
        let k1 = generate_keypair();
        let k2 = generate_keypair();
        assert_ne!(encode_address(&k1.public), encode_address(&k2.public));
    }
}
