//! BitAddr Core
//!
//! Deterministic address and private-key derivation from caller-supplied entropy.
//!
//! # Pipeline
//!
//! Given `(entropy_key, entropy_seed, chain)`:
//! - private key = SHA-256(entropy_key)
//! - public key = uncompressed secp256k1 point, derived on a context seeded
//!   from SHA-256(entropy_seed)
//! - address and private-key export encoded per the chain's profile
//!
//! | Chain | Address | Private key |
//! |-------|---------|-------------|
//! | BTC, BCH legacy | Base58Check `0x00` | WIF `0x80` |
//! | BCH CashAddr | `bitcoincash:` CashAddr | WIF `0x80` |
//! | LTC | Base58Check `0x30` | WIF `0xb0` |
//! | DGB | Base58Check `0x1e` | WIF `0x80` |
//! | ETH | `0x` + Keccak-256 hex | `0x` + hex |
//!
//! # Example
//!
//! ```
//! use bitaddr_core::{derive, Chain};
//!
//! let pair = derive(b"test1", b"test2", Chain::Btc).unwrap();
//! assert_eq!(pair.address(), "1ATYsTBaRVYMkKqW66hr4L2UgR9oXN5hRg");
//! assert_eq!(pair.address.as_field().len(), 40);
//! ```
//!
//! Entropy quality is the caller's responsibility.

pub mod address;
pub mod api;
pub mod buffer;
pub mod cashaddr;
pub mod chain;
pub mod entropy;
pub mod error;
pub mod export;
pub mod keys;
pub mod memory;
pub mod verify;

pub use address::{encode_address, Address};
pub use api::*;
pub use buffer::FixedText;
pub use chain::{AddressScheme, Chain, ChainProfile, PrivkeyScheme};
pub use entropy::hash_entropy;
pub use error::{DeriveError, DeriveResult, VerifyError};
pub use export::{export_privkey, PrivkeyExport};
pub use keys::{seed_context, Deriver, PublicKey65, RawPrivateKey};
pub use verify::{verify_address, verify_wif};
