//! Chain profiles
//!
//! Each supported chain maps to a fixed (address scheme, private-key scheme)
//! pair. The profiles are compiled-in constants and are not configurable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CashAddr human-readable prefix for Bitcoin Cash mainnet
pub const CASHADDR_PREFIX: &str = "bitcoincash";

/// CashAddr version byte: P2PKH type bits (0) | 160-bit hash size bits (0)
pub const CASHADDR_P2PKH_VERSION: u8 = 0x00;

/// Serializes as its kebab-case name; deserializes through [`FromStr`], so
/// config files accept the same names and aliases as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Chain {
    Btc,
    BchLegacy,
    BchCashAddr,
    Ltc,
    Dgb,
    Eth,
}

/// How the public key becomes an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScheme {
    /// HASH160, version byte, double-SHA256 checksum, Base58
    Base58Check { version: u8 },
    /// HASH160 with a CashAddr version byte, CashAddr checksum and prefix
    CashAddr { prefix: &'static str, version: u8 },
    /// Last 20 bytes of Keccak-256 over the 64 coordinate bytes, `0x` hex
    Keccak,
}

/// How the raw private key is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivkeyScheme {
    /// Uncompressed Wallet Import Format with the given version byte
    Wif { version: u8 },
    /// `0x`-prefixed lowercase hex
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainProfile {
    pub address: AddressScheme,
    pub privkey: PrivkeyScheme,
}

impl Chain {
    pub const ALL: [Chain; 6] = [
        Chain::Btc,
        Chain::BchLegacy,
        Chain::BchCashAddr,
        Chain::Ltc,
        Chain::Dgb,
        Chain::Eth,
    ];

    pub const fn profile(self) -> ChainProfile {
        match self {
            Chain::Btc | Chain::BchLegacy => ChainProfile {
                address: AddressScheme::Base58Check { version: 0x00 },
                privkey: PrivkeyScheme::Wif { version: 0x80 },
            },
            Chain::BchCashAddr => ChainProfile {
                address: AddressScheme::CashAddr {
                    prefix: CASHADDR_PREFIX,
                    version: CASHADDR_P2PKH_VERSION,
                },
                privkey: PrivkeyScheme::Wif { version: 0x80 },
            },
            Chain::Ltc => ChainProfile {
                address: AddressScheme::Base58Check { version: 0x30 },
                privkey: PrivkeyScheme::Wif { version: 0xb0 },
            },
            Chain::Dgb => ChainProfile {
                address: AddressScheme::Base58Check { version: 0x1e },
                privkey: PrivkeyScheme::Wif { version: 0x80 },
            },
            Chain::Eth => ChainProfile {
                address: AddressScheme::Keccak,
                privkey: PrivkeyScheme::Hex,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Chain::Btc => "btc",
            Chain::BchLegacy => "bch-legacy",
            Chain::BchCashAddr => "bch-cash-addr",
            Chain::Ltc => "ltc",
            Chain::Dgb => "dgb",
            Chain::Eth => "eth",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "btc" | "bitcoin" => Ok(Chain::Btc),
            "bch-legacy" => Ok(Chain::BchLegacy),
            "bch" | "bch-cash-addr" | "bch-cashaddr" => Ok(Chain::BchCashAddr),
            "ltc" | "litecoin" => Ok(Chain::Ltc),
            "dgb" | "digibyte" => Ok(Chain::Dgb),
            "eth" | "ethereum" => Ok(Chain::Eth),
            other => Err(format!("Unknown chain: {}", other)),
        }
    }
}

impl TryFrom<String> for Chain {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
