//! Symmetric primitives and deterministic password derivation
//!
//! This crate provides the cryptographic core of a password manager: the
//! hash, stream and block ciphers its database format needs, and the
//! Master Password scheme that derives site passwords from a single secret.
//!
//! Every primitive is implemented in-crate and checked byte-for-byte
//! against its published test vectors.
//!
//! # Module overview
//!
//! - `hash`
//!   BLAKE2b (1 to 64 byte digests), SHA-256 and HMAC-SHA-256.
//!
//! - `cipher`
//!   A counter-mode stream cipher framework: the [`cipher::KeystreamBlock`]
//!   trait is the only cipher-specific piece, the generic
//!   [`cipher::CtrCipher`] driver handles buffering, partial blocks and
//!   seeking. ChaCha20 (RFC 7539 and the 64-bit counter variant) and
//!   Salsa20 plug into it, and `std::io` adapters wrap it.
//!
//!   The Twofish block cipher is exposed as a single-block transform, with
//!   CBC/PKCS#7 chaining in a separate wrapper.
//!
//! - `derivation`
//!   scrypt and PBKDF2-HMAC-SHA-256.
//!
//! - `password`
//!   Master key derivation (scrypt over the user identifier and secret) and
//!   template-based site password generation.
//!
//! - `selftest`
//!   Known-answer tests of every primitive, runnable at startup.
//!
//! # Conventions
//!
//! - Every fallible operation returns [`Result`] with a [`CryptoError`].
//!   Invalid arguments are rejected before any state changes.
//! - State holding keys or keystream is wiped on drop (`zeroize`).
//! - Diagnostics go through `tracing`; secrets are never logged.
//!
//! # Example
//!
//! ```no_run
//! use vaultcrypt::password::{HmacSha256Mac, derive_key, generate_password};
//!
//! let key = derive_key("Robert Lee Mitchell", "banana colored duckling")?;
//! let password = generate_password(
//!     "Long Password",
//!     "masterpasswordapp.com",
//!     &key,
//!     1,
//!     &HmacSha256Mac,
//! )?;
//! assert_eq!(password.as_str(), "Jejr5[RepuSosp");
//! # Ok::<(), vaultcrypt::CryptoError>(())
//! ```

pub mod cipher;
pub mod derivation;
pub mod error;
pub mod hash;
pub mod password;
pub mod selftest;

pub use error::{CryptoError, Result};
