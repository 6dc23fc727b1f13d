//! Twofish block cipher
//!
//! 128-bit blocks with 128, 192 or 256-bit keys. Only the single-block
//! transform lives here; chaining modes are in [`crate::cipher::cbc`].

pub mod core;
mod tables;

pub use self::core::{Direction, Twofish};

/// Block size in bytes.
pub const BLOCK_LEN: usize = 16;
