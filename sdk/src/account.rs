//! Account generation and mnemonic import/export.

use lumen_crypto::{
    encode_address, generate_keypair, keypair_from_seed, mnemonic_from_seed, seed_from_mnemonic,
    MnemonicError,
};
use lumen_types::SecretKey;

/// A client-side account: the text address plus its secret key.
///
/// The secret key is caller-owned; nothing in the core retains it.
pub struct Account {
    pub address: String,
    pub secret: SecretKey,
}

/// Generate a fresh account from a secure random source.
pub fn generate_account() -> Account {
    let keypair = generate_keypair();
    Account {
        address: encode_address(&keypair.public),
        secret: keypair.secret,
    }
}

/// Recover the account a 25-word mnemonic encodes.
pub fn mnemonic_to_secret_key(mnemonic: &str) -> Result<Account, MnemonicError> {
    let seed = seed_from_mnemonic(mnemonic)?;
    let keypair = keypair_from_seed(&seed);
    Ok(Account {
        address: encode_address(&keypair.public),
        secret: keypair.secret,
    })
}

/// The 25-word mnemonic for a secret key (its embedded seed).
pub fn secret_key_to_mnemonic(secret: &SecretKey) -> String {
    mnemonic_from_seed(&secret.seed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_crypto::is_valid_address;

    #[test]
    fn generated_account_has_valid_address() {
        let account = generate_account();
        assert!(is_valid_address(&account.address));
    }

    #[test]
    fn mnemonic_roundtrip_preserves_account() {
        let account = generate_account();
        let mnemonic = secret_key_to_mnemonic(&account.secret);
        let recovered = mnemonic_to_secret_key(&mnemonic).unwrap();
        assert_eq!(recovered.address, account.address);
        assert_eq!(recovered.secret.as_bytes(), account.secret.as_bytes());
    }

    #[test]
    fn zero_seed_account_is_reproducible() {
        let keypair = keypair_from_seed(&[0u8; 32]);
        let address = encode_address(&keypair.public);
        assert_eq!(
            address,
            "HNVCPPGOW2SC2YVDVDICU3YNONSTEFLXDXREHJR2YBEKDC2Z3IUZSC6YGI"
        );
        let again = keypair_from_seed(&[0u8; 32]);
        assert_eq!(encode_address(&again.public), address);
    }
}
