//! scrypt (RFC 7914)
//!
//! The derivation runs in three steps:
//! 1. PBKDF2-HMAC-SHA-256 with one iteration expands the password into
//!    `p` lanes of `128 * r` bytes;
//! 2. each lane is mixed with ROMix, which fills and then randomly reads a
//!    table of `N` BlockMix outputs (Salsa20/8 core);
//! 3. PBKDF2-HMAC-SHA-256 with one iteration compresses the mixed lanes
//!    into the output.
//!
//! Memory use is `128 * r * N` bytes. Every scratch buffer is wiped before
//! it is freed.

pub mod core;
pub mod params;
pub mod pbkdf2;
mod romix;

pub use self::core::scrypt;
pub use params::ScryptParams;
pub use pbkdf2::pbkdf2_hmac_sha256;
