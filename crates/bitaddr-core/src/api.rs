//! Derivation entry points
//!
//! One parametrized pipeline serves every chain:
//!
//! 1. seed the curve context from the second entropy input
//! 2. hash the first entropy input into the raw private key
//! 3. derive the uncompressed public key
//! 4. encode the chain's address
//! 5. export the chain's private key
//!
//! Either both strings are produced or an error is returned; there is no
//! partial result.

use serde::Serialize;

use crate::address::{encode_address, Address};
use crate::chain::Chain;
use crate::error::DeriveResult;
use crate::export::{export_privkey, PrivkeyExport};
use crate::keys::{Deriver, RawPrivateKey};

/// An address and its private-key export, both in fixed-width fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedPair {
    pub chain: Chain,
    pub address: Address,
    pub privkey: PrivkeyExport,
}

impl DerivedPair {
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    pub fn privkey(&self) -> &str {
        self.privkey.as_str()
    }

    /// Owned copies of the unpadded texts, as handed to a host runtime
    pub fn to_strings(&self) -> (String, String) {
        (self.address().to_string(), self.privkey().to_string())
    }
}

/// Derive with the process-wide [`Deriver`].
pub fn derive(entropy_key: &[u8], entropy_seed: &[u8], chain: Chain) -> DeriveResult<DerivedPair> {
    derive_with(Deriver::global(), entropy_key, entropy_seed, chain)
}

pub fn derive_with(
    deriver: &Deriver,
    entropy_key: &[u8],
    entropy_seed: &[u8],
    chain: Chain,
) -> DeriveResult<DerivedPair> {
    derive_from_raw_key(
        deriver,
        &RawPrivateKey::from_entropy(entropy_key),
        entropy_seed,
        chain,
    )
}

/// Run steps 1 and 3-5 for an already reduced private key.
pub fn derive_from_raw_key(
    deriver: &Deriver,
    key: &RawPrivateKey,
    entropy_seed: &[u8],
    chain: Chain,
) -> DeriveResult<DerivedPair> {
    let profile = chain.profile();

    let pubkey = deriver.derive_pubkey(entropy_seed, key)?;
    let address = encode_address(&pubkey, &profile.address)?;
    let privkey = export_privkey(key, &profile.privkey)?;

    log::debug!("Derived {} address {}", chain, address);

    Ok(DerivedPair {
        chain,
        address,
        privkey,
    })
}

/// BTC legacy when `chain_flag` is 0, BCH CashAddr for any other value.
pub fn get_address_privkey(
    entropy_a: &[u8],
    entropy_b: &[u8],
    chain_flag: i32,
) -> DeriveResult<DerivedPair> {
    let chain = if chain_flag != 0 {
        Chain::BchCashAddr
    } else {
        Chain::Btc
    };
    derive(entropy_a, entropy_b, chain)
}

pub fn get_address_privkey_ltc(entropy_a: &[u8], entropy_b: &[u8]) -> DeriveResult<DerivedPair> {
    derive(entropy_a, entropy_b, Chain::Ltc)
}

pub fn get_address_privkey_dgb(entropy_a: &[u8], entropy_b: &[u8]) -> DeriveResult<DerivedPair> {
    derive(entropy_a, entropy_b, Chain::Dgb)
}

pub fn get_address_privkey_eth(entropy_a: &[u8], entropy_b: &[u8]) -> DeriveResult<DerivedPair> {
    derive(entropy_a, entropy_b, Chain::Eth)
}
