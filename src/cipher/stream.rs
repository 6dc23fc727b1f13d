//! `std::io` adapters over a counter-mode cipher.
//!
//! [`CtrWriter`] encrypts everything written through it before forwarding
//! to the wrapped writer; [`CtrReader`] decrypts everything read from the
//! wrapped reader. Cipher errors are reported as [`io::Error`] with the
//! underlying [`CryptoError`](crate::error::CryptoError) as the source.

use std::io::{self, Read, Write};

use zeroize::Zeroizing;

use super::ctr::{CtrCipher, KeystreamBlock};

/// Writer that encrypts data before passing it on.
///
/// Ciphertext the inner writer has not taken yet stays pending and is sent
/// before any new plaintext is accepted. A `write` that returns an error
/// has consumed no plaintext and has not advanced the keystream, so the
/// same buffer can be retried after `WouldBlock` or `Interrupted`.
pub struct CtrWriter<W: Write, G: KeystreamBlock> {
    inner: W,
    cipher: CtrCipher<G>,
    /// Encrypted bytes not yet accepted by `inner`.
    pending: Zeroizing<Vec<u8>>,
}

impl<W: Write, G: KeystreamBlock> CtrWriter<W, G> {
    /// Wraps `inner`; bytes are encrypted from the cipher's current offset.
    pub fn new(inner: W, cipher: CtrCipher<G>) -> Self {
        Self {
            inner,
            cipher,
            pending: Zeroizing::new(Vec::new()),
        }
    }

    /// Sends pending ciphertext, then returns the wrapped writer.
    ///
    /// # Errors
    /// Returns the inner writer's error if the pending bytes cannot be
    /// sent; the adapter is dropped in that case.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.send_pending()?;
        Ok(self.inner)
    }

    /// Number of encrypted bytes still waiting for the inner writer.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn send_pending(&mut self) -> io::Result<()> {
        let mut sent = 0;
        let result = loop {
            if sent == self.pending.len() {
                break Ok(());
            }
            match self.inner.write(&self.pending[sent..]) {
                Ok(0) => {
                    break Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write pending ciphertext",
                    ));
                }
                Ok(n) => sent += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };
        self.pending.drain(..sent);
        result
    }
}

impl<W: Write, G: KeystreamBlock> Write for CtrWriter<W, G> {
    /// Sends any pending ciphertext first and fails without consuming
    /// `data` if that does not complete. Otherwise all of `data` is
    /// encrypted and accepted; if the inner writer then takes only part of
    /// it, the rest stays pending for the next `write` or `flush`.
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.send_pending()?;
        if data.is_empty() {
            return Ok(0);
        }

        self.pending.extend_from_slice(data);
        if let Err(e) = self.cipher.encrypt(&mut self.pending) {
            self.pending.clear();
            return Err(io::Error::other(e));
        }

        // The plaintext is consumed now; delivery errors surface on the
        // next call.
        let _ = self.send_pending();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_pending()?;
        self.inner.flush()
    }
}

/// Reader that decrypts data as it is read.
pub struct CtrReader<R: Read, G: KeystreamBlock> {
    inner: R,
    cipher: CtrCipher<G>,
}

impl<R: Read, G: KeystreamBlock> CtrReader<R, G> {
    /// Wraps `inner`; bytes are decrypted from the cipher's current offset.
    pub fn new(inner: R, cipher: CtrCipher<G>) -> Self {
        Self { inner, cipher }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read, G: KeystreamBlock> Read for CtrReader<R, G> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(out)?;
        self.cipher
            .decrypt(&mut out[..n])
            .map_err(io::Error::other)?;
        Ok(n)
    }
}
