//! Key derivation functions
//!
//! - [`scrypt`]: memory-hard password-based key derivation (RFC 7914),
//!   together with the PBKDF2-HMAC-SHA-256 it is built on.

pub mod scrypt;

pub use scrypt::{ScryptParams, pbkdf2_hmac_sha256, scrypt};
