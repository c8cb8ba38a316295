//! 25-word mnemonic encoding of 32-byte seeds.
//!
//! A seed is reinterpreted as a little-endian bit stream and split into
//! 11-bit groups (24 of them, the last zero-padded), each indexing the fixed
//! 2048-entry English word list. A 25th checksum word is derived from the
//! first two bytes of SHA-512/256(seed). The transform is exactly reversible
//! and holds no state.
//!
//! The same transform also serves master derivation keys, which are opaque
//! 32-byte values from this codec's point of view.

use bip39::Language;
use thiserror::Error;

/// Number of words in a complete phrase (24 data + 1 checksum).
const MNEMONIC_LEN: usize = 25;

/// Errors arising from mnemonic decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("wrong mnemonic length: expected {MNEMONIC_LEN} words, got {0}")]
    InvalidMnemonicLength(usize),

    #[error("unknown word: {0}")]
    UnknownWord(String),

    #[error("mnemonic checksum word mismatch")]
    ChecksumMismatch,

    #[error("mnemonic carries nonzero padding bits")]
    InvalidPadding,
}

/// The fixed 2048-entry English word list.
fn word_list() -> &'static [&'static str] {
    Language::English.words_by_prefix("")
}

/// Convert a 32-byte seed to its 25-word mnemonic.
pub fn mnemonic_from_seed(seed: &[u8; 32]) -> String {
    let list = word_list();
    let mut words: Vec<&str> = to_u11_groups(seed)
        .into_iter()
        .map(|idx| list[idx as usize])
        .collect();
    words.push(checksum_word(seed));
    words.join(" ")
}

/// Recover the 32-byte seed from a 25-word mnemonic, verifying the
/// checksum word.
pub fn seed_from_mnemonic(mnemonic: &str) -> Result<[u8; 32], MnemonicError> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    if words.len() != MNEMONIC_LEN {
        return Err(MnemonicError::InvalidMnemonicLength(words.len()));
    }

    let list = word_list();
    let mut groups = Vec::with_capacity(MNEMONIC_LEN - 1);
    for word in &words[..MNEMONIC_LEN - 1] {
        let idx = list
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| MnemonicError::UnknownWord(word.to_string()))?;
        groups.push(idx as u16);
    }

    // 24 groups carry 264 bits; the final byte is pure padding and must be zero.
    let bytes = from_u11_groups(&groups);
    debug_assert_eq!(bytes.len(), 33);
    if bytes[32] != 0 {
        return Err(MnemonicError::InvalidPadding);
    }

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&bytes[..32]);

    if words[MNEMONIC_LEN - 1] != checksum_word(&seed) {
        return Err(MnemonicError::ChecksumMismatch);
    }

    Ok(seed)
}

/// Convert a master derivation key to its mnemonic.
pub fn mnemonic_from_master_derivation_key(mdk: &[u8; 32]) -> String {
    mnemonic_from_seed(mdk)
}

/// Recover a master derivation key from its mnemonic.
pub fn master_derivation_key_from_mnemonic(mnemonic: &str) -> Result<[u8; 32], MnemonicError> {
    seed_from_mnemonic(mnemonic)
}

/// The checksum word: hash the seed, reinterpret the first two bytes as a
/// little-endian 11-bit group, and look it up.
fn checksum_word(seed: &[u8; 32]) -> &'static str {
    let hash = crate::digest(seed);
    let idx = (hash[0] as u16 | (hash[1] as u16) << 8) & 0x7FF;
    word_list()[idx as usize]
}

/// Split bytes into little-endian 11-bit groups (the final group zero-padded).
fn to_u11_groups(bytes: &[u8]) -> Vec<u16> {
    let mut groups = Vec::with_capacity(bytes.len() * 8 / 11 + 1);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &byte in bytes {
        buffer |= (byte as u32) << bits;
        bits += 8;
        while bits >= 11 {
            groups.push((buffer & 0x7FF) as u16);
            buffer >>= 11;
            bits -= 11;
        }
    }
    if bits > 0 {
        groups.push((buffer & 0x7FF) as u16);
    }
    groups
}

/// Reassemble little-endian 11-bit groups into bytes (inverse of
/// `to_u11_groups`, including the padding byte).
fn from_u11_groups(groups: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(groups.len() * 11 / 8 + 1);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &group in groups {
        buffer |= (group as u32) << bits;
        bits += 11;
        while bits >= 8 {
            bytes.push((buffer & 0xFF) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        bytes.push((buffer & 0xFF) as u8);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_zero_seed() {
        let seed = [0u8; 32];
        let mnemonic = mnemonic_from_seed(&seed);
        let words: Vec<&str> = mnemonic.split(' ').collect();
        assert_eq!(words.len(), 25);
        // 256 zero bits map every data group to index 0.
        assert!(words[..24].iter().all(|w| *w == "abandon"));
        assert_eq!(seed_from_mnemonic(&mnemonic).unwrap(), seed);
    }

    #[test]
    fn roundtrip_patterned_seeds() {
        for fill in [0x00u8, 0x01, 0x7F, 0x80, 0xFF] {
            let seed = [fill; 32];
            let mnemonic = mnemonic_from_seed(&seed);
            assert_eq!(seed_from_mnemonic(&mnemonic).unwrap(), seed);
        }
    }

    #[test]
    fn corrupted_word_fails_checksum() {
        let seed = [0u8; 32];
        let mnemonic = mnemonic_from_seed(&seed);
        let corrupted = mnemonic.replacen("abandon", "zoo", 1);
        assert_eq!(
            seed_from_mnemonic(&corrupted),
            Err(MnemonicError::ChecksumMismatch)
        );
    }

    #[test]
    fn wrong_word_count_rejected() {
        let seed = [3u8; 32];
        let mnemonic = mnemonic_from_seed(&seed);
        let truncated: Vec<&str> = mnemonic.split(' ').take(24).collect();
        assert_eq!(
            seed_from_mnemonic(&truncated.join(" ")),
            Err(MnemonicError::InvalidMnemonicLength(24))
        );
        assert_eq!(
            seed_from_mnemonic(""),
            Err(MnemonicError::InvalidMnemonicLength(0))
        );
    }

    #[test]
    fn unknown_word_rejected() {
        let seed = [3u8; 32];
        let mnemonic = mnemonic_from_seed(&seed);
        let mut words: Vec<&str> = mnemonic.split(' ').collect();
        words[5] = "notaword";
        assert_eq!(
            seed_from_mnemonic(&words.join(" ")),
            Err(MnemonicError::UnknownWord("notaword".to_string()))
        );
    }

    #[test]
    fn master_derivation_key_aliases() {
        let mdk = [0xA5u8; 32];
        let mnemonic = mnemonic_from_master_derivation_key(&mdk);
        assert_eq!(master_derivation_key_from_mnemonic(&mnemonic).unwrap(), mdk);
    }

    #[test]
    fn u11_groups_roundtrip() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let groups = to_u11_groups(&bytes);
        assert_eq!(groups.len(), 24);
        let back = from_u11_groups(&groups);
        assert_eq!(&back[..32], &bytes[..]);
        assert_eq!(back[32], 0);
    }
}
