//! Error taxonomy for derivation and verification.
//!
//! Every derivation error is terminal for the call that raised it: no partial
//! address/private-key pair is ever handed back. Derivation is deterministic,
//! so retrying the same inputs reproduces the same error.

use thiserror::Error;

pub type DeriveResult<T> = std::result::Result<T, DeriveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// The 32-byte key is zero or not below the secp256k1 group order.
    #[error("Private key is not a valid secp256k1 scalar")]
    InvalidPrivateKeyScalar,

    /// An encoder produced more text than the fixed output field can hold.
    #[error("Encoded text needs {needed} bytes but the field holds {capacity}")]
    EncodingOverflow { capacity: usize, needed: usize },

    /// A hash, curve or encoding primitive reported failure.
    #[error("Primitive failure: {0}")]
    PrimitiveFailure(String),
}

/// Errors from decoding a previously produced address or private-key export.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("Checksum mismatch")]
    ChecksumMismatch,
    #[error("Wrong version byte: expected {expected:#04x}, found {found:#04x}")]
    WrongVersion { expected: u8, found: u8 },
    #[error("Missing or unexpected prefix")]
    WrongPrefix,
    #[error("Invalid payload length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Chain {0} does not use this encoding")]
    UnsupportedScheme(String),
}
