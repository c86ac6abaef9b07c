//! Entropy collection, derivation and rendering of address/key pairs.

use crate::config::{Config, EntropySource, OutputFormat, OutputSection};
use anyhow::{Context, Result};
use bitaddr_core::{derive, verify_address, verify_wif, Chain, DerivedPair, PrivkeyExport};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::io::Write;
use zeroize::Zeroizing;

/// The two independent entropy strings for one derivation.
pub struct EntropyPair {
    pub key: Zeroizing<String>,
    pub seed: Zeroizing<String>,
}

impl EntropyPair {
    pub fn from_texts(key: &str, seed: &str) -> Self {
        Self {
            key: Zeroizing::new(key.to_string()),
            seed: Zeroizing::new(seed.to_string()),
        }
    }
}

/// Draw `bytes` random bytes and render them as hex entropy text.
fn draw(source: EntropySource, bytes: usize) -> Zeroizing<String> {
    let mut buf = Zeroizing::new(vec![0u8; bytes]);
    match source {
        EntropySource::Os => OsRng.fill_bytes(&mut buf),
    }
    Zeroizing::new(hex::encode(&*buf))
}

/// Two independent draws from the configured source.
pub fn collect_entropy(config: &Config) -> EntropyPair {
    EntropyPair {
        key: draw(config.entropy.source, config.entropy.bytes),
        seed: draw(config.entropy.source, config.entropy.bytes),
    }
}

/// Derive one pair and, if configured, decode it again before returning it.
pub fn derive_pair(entropy: &EntropyPair, chain: Chain, verify: bool) -> Result<DerivedPair> {
    let pair = derive(entropy.key.as_bytes(), entropy.seed.as_bytes(), chain)
        .with_context(|| format!("Derivation failed for {}", chain))?;

    if verify {
        check_pair(&pair)?;
    }
    Ok(pair)
}

/// Decode both outputs and confirm they agree with each other.
pub fn check_pair(pair: &DerivedPair) -> Result<()> {
    verify_address(pair.address(), pair.chain)
        .with_context(|| format!("Produced {} address does not decode", pair.chain))?;

    if let PrivkeyExport::Wif(_) = pair.privkey {
        let key = Zeroizing::new(
            verify_wif(pair.privkey(), pair.chain)
                .with_context(|| format!("Produced {} WIF does not decode", pair.chain))?,
        );
        let rederived = bitaddr_core::api::derive_from_raw_key(
            bitaddr_core::Deriver::global(),
            &bitaddr_core::RawPrivateKey::from_bytes(*key),
            b"verify",
            pair.chain,
        )?;
        anyhow::ensure!(
            rederived.address == pair.address,
            "WIF does not correspond to the {} address",
            pair.chain
        );
    }

    log::debug!("Verified {} pair", pair.chain);
    Ok(())
}

#[derive(Serialize)]
struct PairRecord<'a> {
    chain: Chain,
    address: &'a str,
    privkey: &'a str,
}

fn privkey_label(pair: &DerivedPair) -> &'static str {
    match pair.privkey {
        PrivkeyExport::Wif(_) => "Private Key (WIF)",
        PrivkeyExport::Hex(_) => "Private Key (hex)",
    }
}

/// Keep letters and digits only, breaking lines every `columns` characters.
pub fn wrap_for_display(text: &str, columns: usize) -> String {
    let kept: Vec<char> = text.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    kept.chunks(columns.max(1))
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write one pair in the configured format.
pub fn render<W: Write>(pair: &DerivedPair, output: &OutputSection, out: &mut W) -> Result<()> {
    let address = if output.strip_cashaddr_prefix {
        pair.address.without_prefix()
    } else {
        pair.address()
    };

    match output.format {
        OutputFormat::Text => {
            writeln!(out, "Chain: {}", pair.chain)?;
            writeln!(out, "Address: {}", address)?;
            writeln!(out, "{}: {}", privkey_label(pair), pair.privkey())?;
        }
        OutputFormat::Json => {
            let record = PairRecord {
                chain: pair.chain,
                address,
                privkey: pair.privkey(),
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
        OutputFormat::Display => {
            writeln!(out, "Address:")?;
            writeln!(out, "{}", wrap_for_display(address, output.display_columns))?;
            writeln!(out, "{}:", privkey_label(pair))?;
            writeln!(
                out,
                "{}",
                wrap_for_display(pair.privkey(), output.display_columns)
            )?;
        }
    }
    Ok(())
}

/// Generate `config.wallet.count` pairs from fresh entropy and write them to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    log::info!(
        "Generating {} {} pair(s) from {:?} entropy",
        config.wallet.count,
        config.wallet.chain,
        config.entropy.source
    );

    for i in 0..config.wallet.count {
        let entropy = collect_entropy(config);
        let pair = derive_pair(&entropy, config.wallet.chain, config.output.verify)?;
        if i > 0 && config.output.format != OutputFormat::Json {
            writeln!(out)?;
        }
        render(&pair, &config.output, out)?;
    }
    Ok(())
}
