//! Fixed-width text fields
//!
//! Downstream consumers treat every output as a fixed-width field rather than a
//! delimited string, so each encoding is written into a NUL-padded buffer whose
//! capacity is a compile-time constant of the chain's scheme.

use std::fmt;

use serde::{Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::{DeriveError, DeriveResult};

/// Field width for Base58Check addresses (BTC, BCH legacy, LTC, DGB)
pub const BASE58_ADDRESS_WIDTH: usize = 40;

/// Field width for `bitcoincash:` + 42 payload characters
pub const CASHADDR_ADDRESS_WIDTH: usize = 54;

/// Field width for `0x` + 40 hex characters
pub const EVM_ADDRESS_WIDTH: usize = 42;

/// Field width for WIF private keys
pub const WIF_WIDTH: usize = 70;

/// Field width for `0x` + 64 hex characters
pub const EVM_PRIVKEY_WIDTH: usize = 66;

/// ASCII text stored in an `N`-byte buffer, padded with NUL bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedText<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedText<N> {
    /// Copy `text` into a fresh field.
    ///
    /// Text longer than the field is an [`DeriveError::EncodingOverflow`];
    /// it is never truncated.
    pub fn new(text: &str) -> DeriveResult<Self> {
        let bytes = text.as_bytes();
        if bytes.len() > N {
            return Err(DeriveError::EncodingOverflow {
                capacity: N,
                needed: bytes.len(),
            });
        }
        if !text.is_ascii() {
            return Err(DeriveError::PrimitiveFailure(
                "encoder produced non-ASCII text".into(),
            ));
        }

        let mut buf = [0u8; N];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len(),
        })
    }

    /// The whole field, padding included. Always exactly `N` bytes.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.buf
    }

    /// The encoded text without padding.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Zeroize for FixedText<N> {
    fn zeroize(&mut self) {
        self.buf.zeroize();
        self.len.zeroize();
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedText<{}>({:?})", N, self.as_str())
    }
}

impl<const N: usize> Serialize for FixedText<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
