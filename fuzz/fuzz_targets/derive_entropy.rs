#![no_main]

use bitaddr_core::{derive, verify_address, Chain};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the chain, the rest is split into the two entropy inputs.
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let chain = Chain::ALL[selector as usize % Chain::ALL.len()];
    let (key, seed) = rest.split_at(rest.len() / 2);

    // Any entropy must yield a well-formed pair (an invalid scalar is the only
    // allowed error and is unreachable in practice).
    if let Ok(pair) = derive(key, seed, chain) {
        assert!(verify_address(pair.address(), chain).is_ok());
        assert!(pair.address().len() <= pair.address.as_field().len());
        assert!(pair.privkey().len() <= pair.privkey.as_field().len());
    }
});
