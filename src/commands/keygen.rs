//! Symmetric key generation.

use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;

use bankauth_core::config::TOKEN_KEY_SIZE;

/// Returns a random key of exactly [`TOKEN_KEY_SIZE`] hex characters.
pub fn generate_key() -> String {
    let mut bytes = [0u8; TOKEN_KEY_SIZE / 2];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_has_token_key_size() {
        let key = generate_key();
        assert_eq!(key.len(), TOKEN_KEY_SIZE);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_key());
    }
}
