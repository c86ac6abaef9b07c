//! Key material and public-key derivation
//!
//! The raw private key is the SHA-256 of the key entropy, used as-is.
//! The public key is the uncompressed secp256k1 point for that scalar.
//!
//! # Context seeding
//!
//! The secp256k1 context carries blinding state that the library consults
//! during scalar multiplication. It is re-seeded from SHA-256 of the second
//! entropy input on every derivation, and seeding plus derivation run under one
//! lock so concurrent callers never observe each other's seed. The seed only
//! affects blinding; the resulting public key depends on the private key alone.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::entropy::hash_entropy;
use crate::error::{DeriveError, DeriveResult};

/// Length of an uncompressed SEC1 public key
pub const PUBKEY_65_LENGTH: usize = 65;

/// Marker byte that opens every uncompressed public key
pub const UNCOMPRESSED_MARKER: u8 = 0x04;

/// 32 bytes of secret scalar material, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RawPrivateKey([u8; 32]);

impl RawPrivateKey {
    /// SHA-256 of the key entropy
    pub fn from_entropy(entropy: &[u8]) -> Self {
        Self(hash_entropy(entropy))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for RawPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPrivateKey(<redacted>)")
    }
}

/// Uncompressed public key: `0x04 || X || Y`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey65([u8; PUBKEY_65_LENGTH]);

impl PublicKey65 {
    pub fn as_bytes(&self) -> &[u8; PUBKEY_65_LENGTH] {
        &self.0
    }

    /// The 64 coordinate bytes, marker stripped
    pub fn coordinates(&self) -> &[u8] {
        &self.0[1..]
    }
}

impl fmt::Debug for PublicKey65 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey65({})", hex::encode(self.0))
    }
}

/// Re-seed a context's blinding state from SHA-256 of `entropy_for_seed`.
pub fn seed_context(ctx: &mut Secp256k1<All>, entropy_for_seed: &[u8]) {
    let seed = Zeroizing::new(hash_entropy(entropy_for_seed));
    ctx.seeded_randomize(&seed);
}

/// Owns a secp256k1 context and serializes seed-then-derive sequences on it.
#[derive(Debug)]
pub struct Deriver {
    ctx: Mutex<Secp256k1<All>>,
}

impl Deriver {
    pub fn new() -> Self {
        Self {
            ctx: Mutex::new(Secp256k1::new()),
        }
    }

    /// The process-wide deriver used by the entry points in [`crate::api`].
    pub fn global() -> &'static Deriver {
        static GLOBAL: OnceLock<Deriver> = OnceLock::new();
        GLOBAL.get_or_init(Deriver::new)
    }

    /// Seed the context from `entropy_for_seed`, then derive the public key of `key`.
    ///
    /// Fails with [`DeriveError::InvalidPrivateKeyScalar`] when `key` is zero or
    /// not below the curve order.
    pub fn derive_pubkey(
        &self,
        entropy_for_seed: &[u8],
        key: &RawPrivateKey,
    ) -> DeriveResult<PublicKey65> {
        let mut secret = SecretKey::from_slice(key.as_bytes())
            .map_err(|_| DeriveError::InvalidPrivateKeyScalar)?;

        // A poisoned lock holds no state worth protecting: it is re-seeded below.
        let mut ctx = self.ctx.lock().unwrap_or_else(PoisonError::into_inner);
        seed_context(&mut ctx, entropy_for_seed);
        let public = PublicKey::from_secret_key(&*ctx, &secret);
        drop(ctx);

        secret.non_secure_erase();
        Ok(PublicKey65(public.serialize_uncompressed()))
    }
}

impl Default for Deriver {
    fn default() -> Self {
        Self::new()
    }
}
