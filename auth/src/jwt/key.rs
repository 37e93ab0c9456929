use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::ConfigurationError;

/// Process-wide HMAC secret used to sign and verify tokens.
///
/// The raw bytes are never exposed through `Debug`.
#[derive(Clone)]
pub struct SigningKey {
    secret: Vec<u8>,
}

impl SigningKey {
    /// HS256 keys shorter than the digest size weaken the MAC.
    pub const MIN_LENGTH: usize = 32;

    /// Build a signing key from raw secret bytes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `MissingKey` - Secret is empty
    /// * `KeyTooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, ConfigurationError> {
        if secret.is_empty() {
            return Err(ConfigurationError::MissingKey);
        }
        if secret.len() < Self::MIN_LENGTH {
            return Err(ConfigurationError::KeyTooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            secret: secret.to_vec(),
        })
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_rejected() {
        assert_eq!(
            SigningKey::new(b"").unwrap_err(),
            ConfigurationError::MissingKey
        );
    }

    #[test]
    fn test_short_key_is_rejected() {
        assert_eq!(
            SigningKey::new(b"too-short").unwrap_err(),
            ConfigurationError::KeyTooShort { min: 32, actual: 9 }
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = SigningKey::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();
        let rendered = format!("{:?}", key);

        assert!(!rendered.contains("my_secret_key"));
        assert!(rendered.contains("REDACTED"));
    }
}
