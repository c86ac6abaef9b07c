//! Private-key export
//!
//! - WIF: `base58(version || key || checksum)`, uncompressed form (no 0x01 suffix)
//! - Hex: `0x` + 64 lowercase hex characters

use std::fmt;

use bitcoin::base58;
use serde::Serialize;
use zeroize::{Zeroize, Zeroizing};

use crate::address::{checksum, CHECKSUM_LENGTH};
use crate::buffer::{FixedText, EVM_PRIVKEY_WIDTH, WIF_WIDTH};
use crate::chain::PrivkeyScheme;
use crate::error::DeriveResult;
use crate::keys::RawPrivateKey;

/// Version byte plus 32 key bytes
pub const RAW_PRIVKEY_NOCHECK_LENGTH: usize = 33;

/// Versioned key plus 4-byte checksum
pub const RAW_PRIVKEY_CHECK_LENGTH: usize = RAW_PRIVKEY_NOCHECK_LENGTH + CHECKSUM_LENGTH;

/// An exported private key in its fixed-width field. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PrivkeyExport {
    Wif(FixedText<WIF_WIDTH>),
    Hex(FixedText<EVM_PRIVKEY_WIDTH>),
}

impl PrivkeyExport {
    pub fn as_str(&self) -> &str {
        match self {
            PrivkeyExport::Wif(t) => t.as_str(),
            PrivkeyExport::Hex(t) => t.as_str(),
        }
    }

    /// The full fixed-width field, padding included
    pub fn as_field(&self) -> &[u8] {
        match self {
            PrivkeyExport::Wif(t) => t.as_bytes(),
            PrivkeyExport::Hex(t) => t.as_bytes(),
        }
    }
}

impl Drop for PrivkeyExport {
    fn drop(&mut self) {
        match self {
            PrivkeyExport::Wif(t) => t.zeroize(),
            PrivkeyExport::Hex(t) => t.zeroize(),
        }
    }
}

impl fmt::Debug for PrivkeyExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivkeyExport::Wif(_) => f.write_str("PrivkeyExport::Wif(<redacted>)"),
            PrivkeyExport::Hex(_) => f.write_str("PrivkeyExport::Hex(<redacted>)"),
        }
    }
}

pub fn export_privkey(key: &RawPrivateKey, scheme: &PrivkeyScheme) -> DeriveResult<PrivkeyExport> {
    match *scheme {
        PrivkeyScheme::Wif { version } => {
            let mut raw = Zeroizing::new([0u8; RAW_PRIVKEY_CHECK_LENGTH]);
            raw[0] = version;
            raw[1..RAW_PRIVKEY_NOCHECK_LENGTH].copy_from_slice(key.as_bytes());
            let check = checksum(&raw[..RAW_PRIVKEY_NOCHECK_LENGTH]);
            raw[RAW_PRIVKEY_NOCHECK_LENGTH..].copy_from_slice(&check);

            let text = Zeroizing::new(base58::encode(&raw[..]));
            Ok(PrivkeyExport::Wif(FixedText::new(&text)?))
        }
        PrivkeyScheme::Hex => {
            let text = Zeroizing::new(format!("0x{}", hex::encode(key.as_bytes())));
            Ok(PrivkeyExport::Hex(FixedText::new(&text)?))
        }
    }
}
