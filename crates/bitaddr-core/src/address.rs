//! Public key -> address encoding
//!
//! Three families:
//! - Base58Check: `base58(version || HASH160(pubkey) || checksum)`
//! - CashAddr: `bitcoincash:` + CashAddr(`version || HASH160(pubkey)`)
//! - Keccak: `0x` + hex(last 20 bytes of Keccak-256(pubkey without 0x04))

use std::fmt;

use bitcoin::base58;
use bitcoin::hashes::{hash160, sha256d, Hash};
use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::buffer::{FixedText, BASE58_ADDRESS_WIDTH, CASHADDR_ADDRESS_WIDTH, EVM_ADDRESS_WIDTH};
use crate::cashaddr;
use crate::chain::AddressScheme;
use crate::error::DeriveResult;
use crate::keys::PublicKey65;

/// Version byte plus a 20-byte hash
pub const RAW_ADDRESS_NOCHECK_LENGTH: usize = 21;

/// Versioned hash plus 4-byte checksum
pub const RAW_ADDRESS_CHECK_LENGTH: usize = 25;

pub const CHECKSUM_LENGTH: usize = 4;

/// A chain-encoded address in its fixed-width field.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Address {
    Base58(FixedText<BASE58_ADDRESS_WIDTH>),
    CashAddr(FixedText<CASHADDR_ADDRESS_WIDTH>),
    Evm(FixedText<EVM_ADDRESS_WIDTH>),
}

impl Address {
    pub fn as_str(&self) -> &str {
        match self {
            Address::Base58(t) => t.as_str(),
            Address::CashAddr(t) => t.as_str(),
            Address::Evm(t) => t.as_str(),
        }
    }

    /// The full fixed-width field, padding included
    pub fn as_field(&self) -> &[u8] {
        match self {
            Address::Base58(t) => t.as_bytes(),
            Address::CashAddr(t) => t.as_bytes(),
            Address::Evm(t) => t.as_bytes(),
        }
    }

    /// CashAddr text without its `prefix:` part; other addresses unchanged.
    pub fn without_prefix(&self) -> &str {
        match self {
            Address::CashAddr(t) => t
                .as_str()
                .split_once(':')
                .map_or(t.as_str(), |(_, body)| body),
            _ => self.as_str(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Base58(t) => write!(f, "Address::Base58({:?})", t.as_str()),
            Address::CashAddr(t) => write!(f, "Address::CashAddr({:?})", t.as_str()),
            Address::Evm(t) => write!(f, "Address::Evm({:?})", t.as_str()),
        }
    }
}

/// First four bytes of double-SHA256
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = sha256d::Hash::hash(payload).to_byte_array();
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// RIPEMD160(SHA256(pubkey)) over all 65 bytes
pub fn pubkey_hash(pubkey: &PublicKey65) -> [u8; 20] {
    hash160::Hash::hash(pubkey.as_bytes()).to_byte_array()
}

/// Keccak-256 over the 64 coordinate bytes, last 20 bytes kept
pub fn evm_address_bytes(pubkey: &PublicKey65) -> [u8; 20] {
    let digest = Keccak256::digest(pubkey.coordinates());
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest[12..]);
    out
}

pub fn encode_address(pubkey: &PublicKey65, scheme: &AddressScheme) -> DeriveResult<Address> {
    match *scheme {
        AddressScheme::Base58Check { version } => {
            let mut raw = [0u8; RAW_ADDRESS_CHECK_LENGTH];
            raw[0] = version;
            raw[1..RAW_ADDRESS_NOCHECK_LENGTH].copy_from_slice(&pubkey_hash(pubkey));
            let check = checksum(&raw[..RAW_ADDRESS_NOCHECK_LENGTH]);
            raw[RAW_ADDRESS_NOCHECK_LENGTH..].copy_from_slice(&check);

            Ok(Address::Base58(FixedText::new(&base58::encode(&raw))?))
        }
        AddressScheme::CashAddr { prefix, version } => {
            let mut raw = [0u8; RAW_ADDRESS_NOCHECK_LENGTH];
            raw[0] = version;
            raw[1..].copy_from_slice(&pubkey_hash(pubkey));

            Ok(Address::CashAddr(FixedText::new(&cashaddr::encode(
                prefix, &raw,
            ))?))
        }
        AddressScheme::Keccak => {
            let text = format!("0x{}", hex::encode(evm_address_bytes(pubkey)));
            Ok(Address::Evm(FixedText::new(&text)?))
        }
    }
}
