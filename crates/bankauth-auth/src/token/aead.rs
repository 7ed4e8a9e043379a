//! AES-256-GCM token maker.
//!
//! Wire format: `v1.local.` followed by the unpadded base64url encoding of
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`. The header is bound to
//! the ciphertext as associated data, so a token is only ever decoded after
//! the whole string has been authenticated.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload as AeadPayload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};

use bankauth_core::config::TOKEN_KEY_SIZE;

use super::maker::{TokenError, TokenMaker};
use super::payload::Payload;

/// Version and purpose header prefixed to every token.
const TOKEN_HEADER: &str = "v1.local.";

/// Nonce size for AES-256-GCM (96 bits).
const NONCE_SIZE: usize = 12;

/// Authentication tag size for AES-256-GCM.
const TAG_SIZE: usize = 16;

/// Symmetric authenticated-encryption token maker.
#[derive(Clone)]
pub struct AeadTokenMaker {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for AeadTokenMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadTokenMaker")
            .field("header", &TOKEN_HEADER)
            .finish_non_exhaustive()
    }
}

impl AeadTokenMaker {
    /// Creates a maker from raw key bytes.
    ///
    /// Fails unless `key` is exactly [`TOKEN_KEY_SIZE`] bytes; keys are never
    /// truncated or padded.
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        if key.len() != TOKEN_KEY_SIZE {
            return Err(TokenError::InvalidKeySize {
                expected: TOKEN_KEY_SIZE,
                actual: key.len(),
            });
        }

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| TokenError::InvalidKeySize {
            expected: TOKEN_KEY_SIZE,
            actual: key.len(),
        })?;

        Ok(Self { cipher })
    }

    /// Creates a token valid for `duration` starting at `now`.
    pub fn create_token_at(
        &self,
        username: &str,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration, now)?;
        let token = self.seal(&payload)?;
        Ok((token, payload))
    }

    /// Verifies `token` as if the current time were `now`.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Payload, TokenError> {
        let payload = self.open(token)?;
        payload.validate_at(now)?;
        Ok(payload)
    }

    fn seal(&self, payload: &Payload) -> Result<String, TokenError> {
        let plaintext =
            serde_json::to_vec(payload).map_err(|e| TokenError::Seal(e.to_string()))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                AeadPayload {
                    msg: &plaintext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|e| TokenError::Seal(e.to_string()))?;

        let mut raw = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        raw.extend_from_slice(nonce.as_slice());
        raw.extend_from_slice(&ciphertext);

        Ok(format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode(raw)))
    }

    fn open(&self, token: &str) -> Result<Payload, TokenError> {
        let body = token
            .strip_prefix(TOKEN_HEADER)
            .ok_or(TokenError::InvalidToken)?;

        let raw = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::InvalidToken)?;

        if raw.len() < NONCE_SIZE + TAG_SIZE {
            return Err(TokenError::InvalidToken);
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                AeadPayload {
                    msg: ciphertext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::InvalidToken)?;

        serde_json::from_slice(&plaintext).map_err(|_| TokenError::InvalidToken)
    }
}

impl TokenMaker for AeadTokenMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        self.create_token_at(username, duration, Utc::now())
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        self.verify_token_at(token, Utc::now())
    }
}
