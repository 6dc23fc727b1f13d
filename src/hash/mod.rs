//! Hash functions and message authentication.
//!
//! - `blake2b`: BLAKE2b with 1 to 64 byte digests.
//! - `sha256`: SHA-256, the building block of HMAC and PBKDF2.
//! - `hmac`: HMAC-SHA-256.

pub mod blake2b;
pub mod hmac;
pub mod sha256;

pub use blake2b::{Blake2b, blake2b};
pub use hmac::{HmacSha256, hmac_sha256};
pub use sha256::{Sha256, sha256};
