//! Entropy reduction
//!
//! Arbitrary-length entropy strings are reduced to 32 bytes with SHA-256.
//! Entropy quality is the caller's responsibility.

use bitcoin::hashes::{sha256, Hash};

/// SHA-256 of `entropy`. Accepts any input, including empty.
pub fn hash_entropy(entropy: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(entropy).to_byte_array()
}
