//! Parameter definitions and validation for scrypt.

use crate::error::{CryptoError, Result};

/// Cost parameters for scrypt.
///
/// The [`Default`] value is the setting used for master-password keys:
/// `N = 32768`, `r = 8`, `p = 2`, which needs 32 MiB of memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScryptParams {
    /// Base-2 logarithm of the CPU/memory cost `N`.
    log_n: u8,
    /// Block size factor.
    r: u32,
    /// Parallelization factor (number of lanes).
    p: u32,
}

impl ScryptParams {
    /// Master-password cost setting.
    pub const MASTER_PASSWORD: Self = Self {
        log_n: 15,
        r: 8,
        p: 2,
    };

    /// Validates and builds a parameter set.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKdfParams`] if
    /// - `log_n` is 0, at least 64, or not below `16 * r`;
    /// - `r` or `p` is 0;
    /// - `r * p` reaches 2^30;
    /// - the memory needed does not fit in `usize`.
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self> {
        if r == 0 {
            return Err(CryptoError::InvalidKdfParams("r must be at least 1"));
        }
        if p == 0 {
            return Err(CryptoError::InvalidKdfParams("p must be at least 1"));
        }
        if log_n == 0 || log_n >= 64 {
            return Err(CryptoError::InvalidKdfParams("log_n must be in 1..64"));
        }
        if u64::from(log_n) >= 16 * u64::from(r) {
            return Err(CryptoError::InvalidKdfParams("N must be below 2^(16 r)"));
        }
        if u64::from(r) * u64::from(p) >= 1 << 30 {
            return Err(CryptoError::InvalidKdfParams("r * p must be below 2^30"));
        }

        let params = Self { log_n, r, p };
        params
            .memory_len()
            .ok_or(CryptoError::InvalidKdfParams("memory cost overflows usize"))?;
        Ok(params)
    }

    /// Base-2 logarithm of `N`.
    pub fn log_n(&self) -> u8 {
        self.log_n
    }

    /// Block size factor `r`.
    pub fn r(&self) -> u32 {
        self.r
    }

    /// Parallelization factor `p`.
    pub fn p(&self) -> u32 {
        self.p
    }

    /// `N` as a `usize`, if addressable.
    pub(crate) fn n(&self) -> Option<usize> {
        1usize.checked_shl(u32::from(self.log_n))
    }

    /// Size in bytes of the ROMix table, `128 * r * N`.
    pub fn memory_len(&self) -> Option<usize> {
        self.n()?
            .checked_mul(128)?
            .checked_mul(usize::try_from(self.r).ok()?)
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::MASTER_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_master_password_setting() {
        let params = ScryptParams::default();
        assert_eq!((params.log_n(), params.r(), params.p()), (15, 8, 2));
        assert_eq!(params.memory_len(), Some(32 * 1024 * 1024));
        assert_eq!(ScryptParams::new(15, 8, 2), Ok(params));
    }

    #[test]
    fn validation() {
        assert!(ScryptParams::new(0, 8, 1).is_err());
        assert!(ScryptParams::new(4, 0, 1).is_err());
        assert!(ScryptParams::new(4, 1, 0).is_err());
        assert!(ScryptParams::new(16, 1, 1).is_err());
        assert!(ScryptParams::new(15, 1, 1).is_ok());
        assert!(ScryptParams::new(4, 1 << 15, 1 << 15).is_err());
    }
}
