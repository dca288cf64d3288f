use std::fmt;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{
    Engine,
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{BlindifyError, Result};

/// Nonce size for AES-256-GCM (96 bits)
const NONCE_SIZE: usize = 12;

/// Key size for AES-256 (256 bits)
pub const KEY_SIZE: usize = 32;

/// Symmetric key protecting stored refresh tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Parses a key from a hex or base64 string. Both the standard and the
    /// URL-safe alphabet are accepted, so Fernet keys work as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Config`] if the string decodes to anything
    /// but exactly 32 bytes.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();

        if raw.len() == KEY_SIZE * 2 {
            if let Ok(bytes) = hex::decode(raw) {
                return Self::from_slice(&bytes);
            }
        }

        let bytes = BASE64
            .decode(raw)
            .or_else(|_| URL_SAFE.decode(raw))
            .map_err(|e| BlindifyError::Config(format!("Invalid TOKEN_ENCRYPTION_KEY: {e}")))?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            BlindifyError::Config(format!(
                "TOKEN_ENCRYPTION_KEY must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    /// Base64 form, suitable for `TOKEN_ENCRYPTION_KEY`.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// A refresh token sealed by [`TokenCipher`]: base64 of nonce followed by
/// ciphertext and tag.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedToken(String);

impl EncryptedToken {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedToken({} bytes)", self.0.len())
    }
}

/// AES-256-GCM sealing of refresh tokens under a key fixed at construction.
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    pub fn new(key: &EncryptionKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.0)),
        }
    }

    /// Generates a new random key.
    pub fn generate_key() -> EncryptionKey {
        let mut key = [0u8; KEY_SIZE];
        rand::rng().fill_bytes(&mut key);
        EncryptionKey(key)
    }

    /// Encrypts `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Encryption`] if the AEAD rejects the input.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedToken> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| BlindifyError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(EncryptedToken(BASE64.encode(sealed)))
    }

    /// Decrypts a token produced by [`TokenCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Decryption`] if the token is malformed, was
    /// sealed under another key, or does not decrypt to UTF-8.
    pub fn decrypt(&self, token: &EncryptedToken) -> Result<String> {
        let sealed = BASE64
            .decode(&token.0)
            .map_err(|e| BlindifyError::Decryption(format!("invalid base64: {e}")))?;

        if sealed.len() <= NONCE_SIZE {
            return Err(BlindifyError::Decryption("ciphertext too short".to_string()));
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| BlindifyError::Decryption("authentication failed".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| BlindifyError::Decryption(format!("invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = TokenCipher::new(&TokenCipher::generate_key());
        let plaintext = "AQDqo3z5xVbE-refresh-token";

        let sealed = cipher.encrypt(plaintext).unwrap();
        assert!(!sealed.as_str().contains(plaintext));
        assert_eq!(cipher.decrypt(&sealed).unwrap(), plaintext);
    }

    #[test]
    fn test_nonce_is_fresh_per_encryption() {
        let cipher = TokenCipher::new(&TokenCipher::generate_key());
        let a = cipher.encrypt("same").unwrap();
        let b = cipher.encrypt("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = TokenCipher::new(&TokenCipher::generate_key())
            .encrypt("secret")
            .unwrap();
        let other = TokenCipher::new(&TokenCipher::generate_key());
        assert!(matches!(
            other.decrypt(&sealed),
            Err(BlindifyError::Decryption(_))
        ));
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let cipher = TokenCipher::new(&TokenCipher::generate_key());
        for raw in ["not base64 at all!", "", "AAAA"] {
            assert!(matches!(
                cipher.decrypt(&EncryptedToken::from_raw(raw)),
                Err(BlindifyError::Decryption(_))
            ));
        }
    }

    #[test]
    fn test_parse_key_hex_and_base64() {
        let key = TokenCipher::generate_key();
        let from_b64 = EncryptionKey::parse(&key.to_base64()).unwrap();
        assert_eq!(from_b64, key);

        let from_hex = EncryptionKey::parse(&hex::encode(key.0)).unwrap();
        assert_eq!(from_hex, key);
    }

    #[test]
    fn test_parse_key_url_safe_base64() {
        let raw = URL_SAFE.encode([0xfb; KEY_SIZE]);
        assert!(raw.contains('-') && raw.contains('_'));
        assert_eq!(
            EncryptionKey::parse(&raw).unwrap(),
            EncryptionKey([0xfb; KEY_SIZE])
        );

        let fernet = "hR_x-Q3vZ8v2fJk9Lm0Pq1Rs2Tu3Vw4Xy5Za6Bc7De8=";
        let key = EncryptionKey::parse(fernet).unwrap();
        assert_eq!(URL_SAFE.encode(key.0), fernet);
    }

    #[test]
    fn test_parse_key_wrong_length() {
        let short = BASE64.encode([1u8; 16]);
        assert!(matches!(
            EncryptionKey::parse(&short),
            Err(BlindifyError::Config(_))
        ));
        assert!(EncryptionKey::parse("%%%").is_err());
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = TokenCipher::generate_key();
        assert_eq!(format!("{key:?}"), "EncryptionKey(<redacted>)");
    }
}
