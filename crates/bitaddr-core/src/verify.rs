//! Decoding of produced outputs
//!
//! Used to double-check a derivation before it is shown to anyone, and to
//! confirm that two chains' outputs differ only in their version bytes.

use bitcoin::base58;

use crate::address::{checksum, CHECKSUM_LENGTH};
use crate::cashaddr;
use crate::chain::{AddressScheme, Chain, PrivkeyScheme};
use crate::error::VerifyError;

/// Base58-decode `text` and split off a freshly recomputed double-SHA256 checksum.
pub fn decode_base58check(text: &str) -> Result<Vec<u8>, VerifyError> {
    let raw = base58::decode(text).map_err(|e| VerifyError::InvalidEncoding(e.to_string()))?;
    if raw.len() < CHECKSUM_LENGTH {
        return Err(VerifyError::InvalidLength {
            expected: CHECKSUM_LENGTH,
            found: raw.len(),
        });
    }

    let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LENGTH);
    if checksum(payload).as_slice() != check {
        return Err(VerifyError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

fn expect_versioned<const N: usize>(
    payload: &[u8],
    version: u8,
) -> Result<[u8; N], VerifyError> {
    if payload.len() != N + 1 {
        return Err(VerifyError::InvalidLength {
            expected: N + 1,
            found: payload.len(),
        });
    }
    if payload[0] != version {
        return Err(VerifyError::WrongVersion {
            expected: version,
            found: payload[0],
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&payload[1..]);
    Ok(out)
}

/// Check that `text` is a well-formed address for `chain` and return its 20-byte hash.
pub fn verify_address(text: &str, chain: Chain) -> Result<[u8; 20], VerifyError> {
    match chain.profile().address {
        AddressScheme::Base58Check { version } => {
            let payload = decode_base58check(text)?;
            expect_versioned::<20>(&payload, version)
        }
        AddressScheme::CashAddr { prefix, version } => {
            let (found_prefix, payload) = cashaddr::decode(text)?;
            if found_prefix != prefix {
                return Err(VerifyError::WrongPrefix);
            }
            expect_versioned::<20>(&payload, version)
        }
        AddressScheme::Keccak => {
            let digits = text.strip_prefix("0x").ok_or(VerifyError::WrongPrefix)?;
            let bytes =
                hex::decode(digits).map_err(|e| VerifyError::InvalidEncoding(e.to_string()))?;
            bytes.try_into().map_err(|b: Vec<u8>| VerifyError::InvalidLength {
                expected: 20,
                found: b.len(),
            })
        }
    }
}

/// Check that `text` is a WIF export for `chain` and return the raw key bytes.
pub fn verify_wif(text: &str, chain: Chain) -> Result<[u8; 32], VerifyError> {
    let PrivkeyScheme::Wif { version } = chain.profile().privkey else {
        return Err(VerifyError::UnsupportedScheme(chain.to_string()));
    };
    let payload = decode_base58check(text)?;
    expect_versioned::<32>(&payload, version)
}
