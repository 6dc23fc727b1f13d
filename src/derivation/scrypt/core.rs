//! scrypt entry point.

use tracing::debug;
use zeroize::Zeroizing;

use super::params::ScryptParams;
use super::pbkdf2::pbkdf2_hmac_sha256;
use super::romix::ro_mix;
use crate::error::{CryptoError, Result};

/// Largest output PBKDF2-HMAC-SHA-256 can produce, `(2^32 - 1) * 32`.
const MAX_OUTPUT_LEN: u64 = 0xffff_ffff * 32;

/// Derives `out.len()` bytes from `password` and `salt`.
///
/// # Errors
/// - [`CryptoError::InvalidOutputLength`] if `out` is empty or longer than
///   PBKDF2 allows.
/// - [`CryptoError::InvalidKdfParams`] if the lane buffers cannot be
///   allocated on this platform.
pub fn scrypt(password: &[u8], salt: &[u8], params: &ScryptParams, out: &mut [u8]) -> Result<()> {
    if out.is_empty() || out.len() as u64 > MAX_OUTPUT_LEN {
        return Err(CryptoError::InvalidOutputLength(out.len()));
    }

    let too_large = CryptoError::InvalidKdfParams("memory cost overflows usize");
    let n = params.n().ok_or(too_large.clone())?;
    let table_len = params.memory_len().ok_or(too_large.clone())?;
    let r128 = 128 * params.r() as usize;
    let lanes_len = r128
        .checked_mul(params.p() as usize)
        .ok_or(too_large)?;

    debug!(
        log_n = params.log_n(),
        r = params.r(),
        p = params.p(),
        out_len = out.len(),
        "scrypt"
    );

    let mut b = Zeroizing::new(vec![0u8; lanes_len]);
    pbkdf2_hmac_sha256(password, salt, 1, &mut b);

    let mut v = Zeroizing::new(vec![0u32; table_len / 4]);
    let mut scratch = Zeroizing::new(vec![0u32; r128 / 2]);
    for lane in b.chunks_mut(r128) {
        ro_mix(lane, &mut v, &mut scratch, n);
    }

    pbkdf2_hmac_sha256(password, &b, 1, out);
    Ok(())
}
