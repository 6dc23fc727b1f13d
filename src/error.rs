//! Error taxonomy shared by every primitive in the crate.
//!
//! Errors fall into three groups:
//! - invalid arguments, rejected before any state is touched;
//! - fatal exhaustion of a stream cipher counter, after which the cipher
//!   must not be used again;
//! - internal consistency failures (self test, table lookups).

use thiserror::Error;

/// Errors returned by the hash, cipher, derivation and password modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// A key of the wrong size was supplied.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: &'static str, actual: usize },

    /// A stream cipher nonce of the wrong size was supplied.
    #[error("invalid nonce length: {actual} bytes")]
    InvalidNonceLength { actual: usize },

    /// A block cipher IV of the wrong size was supplied.
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// Requested digest or derived key length is out of range.
    #[error("invalid output length: {0}")]
    InvalidOutputLength(usize),

    /// Seek target is not block aligned or lies outside the counter range.
    #[error("invalid keystream offset: {0}")]
    InvalidOffset(u64),

    /// Counter value zero is reserved.
    #[error("counter must be non-zero")]
    InvalidCounter,

    /// An identifier or site name does not fit a 32-bit length prefix.
    #[error("input too long: {0} bytes")]
    InputTooLong(usize),

    /// Key derivation parameters rejected by validation.
    #[error("invalid key derivation parameters: {0}")]
    InvalidKdfParams(&'static str),

    /// Ciphertext is empty or not a multiple of the block size.
    #[error("invalid ciphertext length: {0}")]
    InvalidCiphertextLength(usize),

    /// PKCS#7 padding did not verify.
    #[error("invalid padding")]
    InvalidPadding,

    /// The keystream block counter would wrap and reuse keystream.
    #[error("{0}: data too large, block counter exhausted")]
    CounterExhausted(&'static str),

    /// No template table exists for this class name.
    #[error("unknown template class '{0}'")]
    UnknownTemplateClass(String),

    /// A template holds a placeholder with no character class. Only
    /// reachable if the built-in tables are inconsistent.
    #[error("template placeholder {0:?} has no character class")]
    UnknownPlaceholder(char),

    /// The keyed MAC produced fewer bytes than the template consumes.
    #[error("seed too short: template needs {needed} bytes, MAC produced {actual}")]
    SeedTooShort { needed: usize, actual: usize },

    /// A known-answer test did not reproduce its reference output.
    #[error("self test failed: {0}")]
    SelfTestFailed(&'static str),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
