#![no_main]

use bitaddr_core::{verify_address, verify_wif, Chain};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary text must never panic.
    if let Ok(s) = std::str::from_utf8(data) {
        for chain in Chain::ALL {
            let _ = verify_address(s, chain);
            let _ = verify_wif(s, chain);
        }
    }
});
