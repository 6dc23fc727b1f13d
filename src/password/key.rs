use std::time::Instant;

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use super::generator::{generate, length_prefixed};
use super::mac::KeyedMac;
use super::templates::TemplateClass;
use super::{MASTER_KEY_LEN, MASTER_PASSWORD_SCOPE};
use crate::derivation::scrypt::{ScryptParams, scrypt};
use crate::error::Result;

/// 64-byte master key derived from a user identifier and master secret.
///
/// Zeroized on drop; `Debug` output never shows the key bytes.
#[derive(Clone)]
pub struct MasterKey {
    bytes: [u8; MASTER_KEY_LEN],
}

impl MasterKey {
    /// Derives the master key with the standard scrypt cost
    /// (`N = 32768, r = 8, p = 2`).
    ///
    /// The salt is the scope string followed by the big-endian 32-bit byte
    /// length of `identifier` and its UTF-8 bytes. Empty strings are valid.
    ///
    /// # Errors
    /// Returns [`CryptoError::InputTooLong`](crate::error::CryptoError::InputTooLong)
    /// if `identifier` exceeds 4 GiB.
    pub fn derive(identifier: &str, secret: &str) -> Result<Self> {
        Self::derive_with_params(identifier, secret, &ScryptParams::MASTER_PASSWORD)
    }

    /// Derives a key with a non-standard scrypt cost.
    ///
    /// Keys derived this way do not match keys from other master-password
    /// implementations.
    ///
    /// # Errors
    /// [`CryptoError::InputTooLong`](crate::error::CryptoError::InputTooLong)
    /// as for [`MasterKey::derive`], or any error from
    /// [`scrypt`](crate::derivation::scrypt()).
    pub fn derive_with_params(
        identifier: &str,
        secret: &str,
        params: &ScryptParams,
    ) -> Result<Self> {
        let start = Instant::now();

        let mut salt = Zeroizing::new(MASTER_PASSWORD_SCOPE.as_bytes().to_vec());
        length_prefixed(&mut salt, identifier.as_bytes())?;

        // Derived straight into the key so every exit path wipes it.
        let mut key = Self {
            bytes: [0; MASTER_KEY_LEN],
        };
        scrypt(secret.as_bytes(), &salt, params, &mut key.bytes)?;

        debug!(
            log_n = params.log_n(),
            r = params.r(),
            p = params.p(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "master key derived"
        );

        Ok(key)
    }

    /// Wraps raw key bytes, e.g. a key stored by the caller.
    pub fn from_bytes(bytes: [u8; MASTER_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes, the MAC key for site seeds.
    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_LEN] {
        &self.bytes
    }

    /// Generates the password for `site_name` from this key.
    ///
    /// See [`generate_password`](super::generate_password) for the
    /// algorithm and errors.
    pub fn password<M: KeyedMac + ?Sized>(
        &self,
        class: TemplateClass,
        site_name: &str,
        counter: u32,
        mac: &M,
    ) -> Result<Zeroizing<String>> {
        generate(class, site_name, self, counter, mac)
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives the master key for `identifier` and `secret`.
///
/// Same as [`MasterKey::derive`].
pub fn derive_key(identifier: &str, secret: &str) -> Result<MasterKey> {
    MasterKey::derive(identifier, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let key = MasterKey::from_bytes([0xab; MASTER_KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("171"));
        assert!(!shown.to_lowercase().contains("ab, "));
    }

    #[test]
    fn cheap_params_are_deterministic() {
        let params = ScryptParams::new(4, 1, 1).unwrap();
        let a = MasterKey::derive_with_params("user", "secret", &params).unwrap();
        let b = MasterKey::derive_with_params("user", "secret", &params).unwrap();
        let c = MasterKey::derive_with_params("user2", "secret", &params).unwrap();

        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn derived_bytes_match_scrypt() {
        let params = ScryptParams::new(4, 1, 1).unwrap();
        let key = MasterKey::derive_with_params("user", "secret", &params).unwrap();

        let mut salt = MASTER_PASSWORD_SCOPE.as_bytes().to_vec();
        length_prefixed(&mut salt, b"user").unwrap();
        let mut expected = [0u8; MASTER_KEY_LEN];
        scrypt(b"secret", &salt, &params, &mut expected).unwrap();

        assert_eq!(key.as_bytes(), &expected);
        assert_ne!(key.as_bytes(), &[0; MASTER_KEY_LEN]);
    }
}
