//! Cross-chain properties of the derivation pipeline.

use std::sync::Arc;
use std::thread;

use bitaddr_core::buffer::{
    BASE58_ADDRESS_WIDTH, CASHADDR_ADDRESS_WIDTH, EVM_ADDRESS_WIDTH, EVM_PRIVKEY_WIDTH, WIF_WIDTH,
};
use bitaddr_core::verify::decode_base58check;
use bitaddr_core::{
    derive, derive_with, verify_address, verify_wif, Address, Chain, Deriver, PrivkeyExport,
};

const ENTROPY_PAIRS: &[(&[u8], &[u8])] = &[
    (b"test1", b"test2"),
    (b"", b""),
    (b"", b"seed only"),
    (b"key only", b""),
    (&[0u8; 64], &[0xffu8; 3]),
    (b"\x00\x01\x02 arbitrary bytes \xfe\xff", b"more"),
];

#[test]
fn test_determinism_all_chains() {
    for &(a, b) in ENTROPY_PAIRS {
        for chain in Chain::ALL {
            let first = derive(a, b, chain).unwrap();
            let second = derive(a, b, chain).unwrap();
            assert_eq!(first.address.as_field(), second.address.as_field());
            assert_eq!(first.privkey.as_field(), second.privkey.as_field());
        }
    }
}

#[test]
fn test_field_widths_are_fixed_per_chain() {
    for &(a, b) in ENTROPY_PAIRS {
        for chain in Chain::ALL {
            let pair = derive(a, b, chain).unwrap();
            match (&pair.address, chain) {
                (Address::Base58(_), Chain::Btc | Chain::BchLegacy | Chain::Ltc | Chain::Dgb) => {
                    assert_eq!(pair.address.as_field().len(), BASE58_ADDRESS_WIDTH)
                }
                (Address::CashAddr(_), Chain::BchCashAddr) => {
                    assert_eq!(pair.address.as_field().len(), CASHADDR_ADDRESS_WIDTH);
                    assert_eq!(pair.address().len(), CASHADDR_ADDRESS_WIDTH);
                }
                (Address::Evm(_), Chain::Eth) => {
                    assert_eq!(pair.address.as_field().len(), EVM_ADDRESS_WIDTH);
                    assert_eq!(pair.address().len(), EVM_ADDRESS_WIDTH);
                }
                (other, chain) => panic!("unexpected address {:?} for {}", other, chain),
            }
            match (&pair.privkey, chain) {
                (PrivkeyExport::Hex(_), Chain::Eth) => {
                    assert_eq!(pair.privkey.as_field().len(), EVM_PRIVKEY_WIDTH);
                    assert_eq!(pair.privkey().len(), EVM_PRIVKEY_WIDTH);
                }
                (PrivkeyExport::Wif(_), chain) if chain != Chain::Eth => {
                    assert_eq!(pair.privkey.as_field().len(), WIF_WIDTH);
                    // Uncompressed WIF is always 51 characters
                    assert_eq!(pair.privkey().len(), 51);
                }
                (other, chain) => panic!("unexpected export {:?} for {}", other, chain),
            }
        }
    }
}

#[test]
fn test_chain_isolation_btc_ltc() {
    let btc = derive(b"test1", b"test2", Chain::Btc).unwrap();
    let ltc = derive(b"test1", b"test2", Chain::Ltc).unwrap();

    let btc_addr = decode_base58check(btc.address()).unwrap();
    let ltc_addr = decode_base58check(ltc.address()).unwrap();
    assert_eq!(btc_addr[0], 0x00);
    assert_eq!(ltc_addr[0], 0x30);
    assert_eq!(btc_addr[1..], ltc_addr[1..]);

    let btc_wif = decode_base58check(btc.privkey()).unwrap();
    let ltc_wif = decode_base58check(ltc.privkey()).unwrap();
    assert_eq!(btc_wif[0], 0x80);
    assert_eq!(ltc_wif[0], 0xb0);
    assert_eq!(btc_wif[1..], ltc_wif[1..]);
}

#[test]
fn test_bch_legacy_matches_btc() {
    let btc = derive(b"test1", b"test2", Chain::Btc).unwrap();
    let bch = derive(b"test1", b"test2", Chain::BchLegacy).unwrap();
    assert_eq!(btc.address(), bch.address());
    assert_eq!(btc.privkey(), bch.privkey());
}

#[test]
fn test_all_outputs_verify() {
    for &(a, b) in ENTROPY_PAIRS {
        let key = bitaddr_core::hash_entropy(a);
        let btc_hash = verify_address(derive(a, b, Chain::Btc).unwrap().address(), Chain::Btc)
            .unwrap();

        for chain in Chain::ALL {
            let pair = derive(a, b, chain).unwrap();
            let hash = verify_address(pair.address(), chain).unwrap();
            if chain != Chain::Eth {
                assert_eq!(hash, btc_hash, "{} hashes the same public key", chain);
                assert_eq!(verify_wif(pair.privkey(), chain).unwrap(), key);
            } else {
                assert_eq!(pair.privkey(), format!("0x{}", hex::encode(key)));
            }
        }
    }
}

#[test]
fn test_seed_entropy_does_not_affect_outputs() {
    for chain in Chain::ALL {
        let a = derive(b"test1", b"test2", chain).unwrap();
        let b = derive(b"test1", b"a completely different seed", chain).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_empty_entropy_vector() {
    let btc = derive(b"", b"", Chain::Btc).unwrap();
    assert_eq!(btc.address(), "1HZwkjkeaoZfTSaJxDw6aKkxp45agDiEzN");
    assert_eq!(
        btc.privkey(),
        "5KYZdUEo39z3FPrtuX2QbbwGnNP5zTd7yyr2SC1j299sBCnWjss"
    );

    let eth = derive(b"", b"", Chain::Eth).unwrap();
    assert_eq!(eth.address(), "0x41ad2bc63a2059f9b623533d87fe99887d794847");

    let bch = derive(b"", b"", Chain::BchCashAddr).unwrap();
    assert_eq!(
        bch.address(),
        "bitcoincash:qz6m6puuf4tucl7z3m8cyyaxk7gkykupsvha9n4u36"
    );
}

#[test]
fn test_concurrent_derivations_match_sequential() {
    let deriver = Arc::new(Deriver::new());
    let inputs: Vec<(String, String, Chain)> = (0..24)
        .map(|i| {
            (
                format!("key-{}", i),
                format!("seed-{}", i),
                Chain::ALL[i % Chain::ALL.len()],
            )
        })
        .collect();

    let expected: Vec<_> = inputs
        .iter()
        .map(|(a, b, c)| derive_with(&deriver, a.as_bytes(), b.as_bytes(), *c).unwrap())
        .collect();

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|(a, b, c)| {
            let deriver = Arc::clone(&deriver);
            thread::spawn(move || derive_with(&deriver, a.as_bytes(), b.as_bytes(), c).unwrap())
        })
        .collect();

    for (handle, want) in handles.into_iter().zip(expected) {
        assert_eq!(handle.join().unwrap(), want);
    }
}
