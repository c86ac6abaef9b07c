//! Print the reference derivation for every chain profile
//! Run with: cargo run --example all_chains -- [KEY_ENTROPY] [SEED_ENTROPY]

use bitaddr_core::{derive, Chain};

fn main() {
    let mut args = std::env::args().skip(1);
    let key = args.next().unwrap_or_else(|| "test1".to_string());
    let seed = args.next().unwrap_or_else(|| "test2".to_string());

    println!("=== BITADDR REFERENCE DERIVATION ===\n");
    println!("Key entropy:  {:?}", key);
    println!("Seed entropy: {:?}\n", seed);

    for chain in Chain::ALL {
        match derive(key.as_bytes(), seed.as_bytes(), chain) {
            Ok(pair) => {
                println!("[{}]", chain);
                println!("  Address:     {}", pair.address());
                println!("  Private key: {}\n", pair.privkey());
            }
            Err(e) => println!("[{}] derivation failed: {}\n", chain, e),
        }
    }
}
