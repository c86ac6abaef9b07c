//! CashAddr: Bitcoin Cash address encoding
//!
//! A Bech32-like format with a 40-bit BCH checksum over the lower 5 bits of
//! the prefix, a zero separator, and the 5-bit payload.
//!
//! Reference: https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md

use crate::error::VerifyError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Generator coefficients of the checksum polynomial
const GEN: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Number of 5-bit checksum symbols
const CHECKSUM_LEN: usize = 8;

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;

    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, g) in GEN.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= g;
            }
        }
    }

    c ^ 1
}

/// Prefix contribution to the checksum: lower 5 bits of each char, then a zero
fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

/// Regroup a bit stream from `from`-bit to `to`-bit words.
///
/// With `pad`, leftover bits are zero-padded into a final word; without it,
/// leftover bits must be zero padding shorter than `from`.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max = (1u32 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        if u32::from(value) >> from != 0 {
            return None;
        }
        acc = (acc << from) | u32::from(value);
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return None;
    }

    Some(out)
}

/// Encode `payload` (version byte followed by the hash) under `prefix`.
pub fn encode(prefix: &str, payload: &[u8]) -> String {
    // 8-bit to 5-bit regrouping with padding cannot fail
    let data = convert_bits(payload, 8, 5, true).unwrap_or_default();

    let checksum = polymod(
        prefix_values(prefix)
            .chain(data.iter().copied())
            .chain([0u8; CHECKSUM_LEN]),
    );

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(prefix);
    out.push(':');
    for &d in &data {
        out.push(CHARSET[d as usize] as char);
    }
    for i in 0..CHECKSUM_LEN {
        let symbol = (checksum >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f;
        out.push(CHARSET[symbol as usize] as char);
    }
    out
}

/// Decode a prefixed CashAddr string into `(prefix, payload)`.
///
/// All-lowercase and all-uppercase inputs are accepted; mixed case is not.
pub fn decode(text: &str) -> Result<(String, Vec<u8>), VerifyError> {
    let has_lower = text.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = text.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(VerifyError::InvalidEncoding("mixed case".into()));
    }
    let text = text.to_ascii_lowercase();

    let (prefix, body) = text.rsplit_once(':').ok_or(VerifyError::WrongPrefix)?;
    if prefix.is_empty() {
        return Err(VerifyError::WrongPrefix);
    }
    if body.len() < CHECKSUM_LEN {
        return Err(VerifyError::InvalidEncoding("too short".into()));
    }

    let values = body
        .bytes()
        .map(|b| {
            CHARSET
                .iter()
                .position(|&c| c == b)
                .map(|p| p as u8)
                .ok_or_else(|| VerifyError::InvalidEncoding(format!("bad character {:?}", b as char)))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if polymod(prefix_values(prefix).chain(values.iter().copied())) != 0 {
        return Err(VerifyError::ChecksumMismatch);
    }

    let data = &values[..values.len() - CHECKSUM_LEN];
    let payload = convert_bits(data, 5, 8, false)
        .ok_or_else(|| VerifyError::InvalidEncoding("non-zero padding".into()))?;

    Ok((prefix.to_string(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// HASH160 behind legacy address 1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu
    const VECTOR_HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";
    const VECTOR_ADDR: &str = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";

    fn vector_payload() -> Vec<u8> {
        let mut payload = vec![0u8];
        payload.extend(hex::decode(VECTOR_HASH).unwrap());
        payload
    }

    #[test]
    fn test_reference_vector() {
        assert_eq!(encode("bitcoincash", &vector_payload()), VECTOR_ADDR);
    }

    #[test]
    fn test_decode_reference_vector() {
        let (prefix, payload) = decode(VECTOR_ADDR).unwrap();
        assert_eq!(prefix, "bitcoincash");
        assert_eq!(payload, vector_payload());
    }

    #[test]
    fn test_uppercase_accepted() {
        let (_, payload) = decode(&VECTOR_ADDR.to_uppercase()).unwrap();
        assert_eq!(payload, vector_payload());
    }

    #[test]
    fn test_mixed_case_rejected() {
        let mixed = VECTOR_ADDR.replacen('q', "Q", 1);
        assert!(matches!(decode(&mixed), Err(VerifyError::InvalidEncoding(_))));
    }

    #[test]
    fn test_single_char_error_detected() {
        let mut corrupted = VECTOR_ADDR.to_string();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'a' { 'q' } else { 'a' });
        assert_eq!(decode(&corrupted), Err(VerifyError::ChecksumMismatch));
    }

    #[test]
    fn test_prefix_is_part_of_checksum() {
        let body = VECTOR_ADDR.split_once(':').unwrap().1;
        assert_eq!(
            decode(&format!("bchtest:{}", body)),
            Err(VerifyError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let body = VECTOR_ADDR.split_once(':').unwrap().1;
        assert_eq!(decode(body), Err(VerifyError::WrongPrefix));
    }

    #[test]
    fn test_p2pkh_length() {
        // 21 payload bytes -> 34 data symbols + 8 checksum symbols
        let encoded = encode("bitcoincash", &vector_payload());
        assert_eq!(encoded.len(), "bitcoincash:".len() + 42);
    }

    #[test]
    fn test_convert_bits_rejects_out_of_range() {
        assert!(convert_bits(&[32], 5, 8, false).is_none());
    }
}
