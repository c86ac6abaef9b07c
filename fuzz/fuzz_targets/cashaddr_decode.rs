#![no_main]

use bitaddr_core::cashaddr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever decodes must re-encode to the same lowercase text.
        if let Ok((prefix, payload)) = cashaddr::decode(s) {
            assert_eq!(cashaddr::encode(&prefix, &payload), s.to_ascii_lowercase());
        }
    }
});
