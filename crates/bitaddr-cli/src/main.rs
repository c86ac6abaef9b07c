//! BitAddr: generate a cryptocurrency address and private key from entropy
//!
//! # Usage
//!
//! ```bash
//! bitaddr                           # one BTC pair from OS entropy
//! bitaddr --chain ltc --count 5
//! bitaddr --chain eth --entropy "test1" "test2"
//! bitaddr --config bitaddr.toml --validate
//! ```

mod config;
mod generate;

use anyhow::{Context, Result};
use bitaddr_core::Chain;
use std::path::PathBuf;

struct Args {
    config_path: Option<PathBuf>,
    chain: Option<Chain>,
    count: Option<u32>,
    format: Option<config::OutputFormat>,
    entropy: Option<(String, String)>,
    validate_only: bool,
}

enum Command {
    Run(Args),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut parsed = Args {
        config_path: None,
        chain: None,
        count: None,
        format: None,
        entropy: None,
        validate_only: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", flag))
        };
        let flag = arg.as_str();
        match flag {
            "--config" | "-c" => parsed.config_path = Some(PathBuf::from(value(flag)?)),
            "--chain" => {
                parsed.chain = Some(value(flag)?.parse::<Chain>().map_err(|e| anyhow::anyhow!(e))?)
            }
            "--count" | "-n" => {
                parsed.count = Some(value(flag)?.parse::<u32>().context("--count expects a number")?)
            }
            "--format" | "-f" => parsed.format = Some(value(flag)?.parse::<config::OutputFormat>()?),
            "--entropy" => {
                let key = value(flag)?;
                let seed = value(flag)?;
                parsed.entropy = Some((key, seed));
            }
            "--validate" => parsed.validate_only = true,
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(Command::Run(parsed))
}

fn main() -> Result<()> {
    // Security hardening: a crash must not write key material to a core file.
    // Reported once the logger is up.
    let core_dumps_off = bitaddr_core::memory::disable_core_dumps();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args)? {
        Command::Run(args) => args,
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("bitaddr {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    // Load config
    let mut config = match &args.config_path {
        Some(path) => config::Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::Config::default(),
    };

    // Apply env overrides, then flags
    config.apply_env_overrides()?;
    if let Some(chain) = args.chain {
        config.wallet.chain = chain;
    }
    if let Some(count) = args.count {
        config.wallet.count = count;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config.validate().context("Configuration validation failed")?;

    // Init logger
    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .parse_default_env()
        .init();

    if let Some(warning) = hardening_warning(core_dumps_off) {
        log::warn!("{}", warning);
    }

    if args.validate_only {
        println!("✅ Configuration is valid.");
        println!("  Chain:    {}", config.wallet.chain);
        println!("  Count:    {}", config.wallet.count);
        println!("  Entropy:  {:?} ({} bytes)", config.entropy.source, config.entropy.bytes);
        println!("  Format:   {:?}", config.output.format);
        println!("  Verify:   {}", config.output.verify);
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.entropy {
        Some((key, seed)) => {
            log::warn!("Using caller-supplied entropy; output is only as secret as the input");
            let entropy = generate::EntropyPair::from_texts(&key, &seed);
            let pair = generate::derive_pair(&entropy, config.wallet.chain, config.output.verify)?;
            generate::render(&pair, &config.output, &mut out)?;
        }
        None => generate::run(&config, &mut out)?,
    }

    Ok(())
}

fn hardening_warning(core_dumps_off: bool) -> Option<&'static str> {
    if core_dumps_off {
        None
    } else {
        Some("Core dumps could not be disabled; a crash may write key material to disk")
    }
}

fn print_help() {
    println!(
        r#"BitAddr: address and private key generator

USAGE:
    bitaddr [OPTIONS]

OPTIONS:
    -c, --config <PATH>        Config file path (TOML, optional)
        --chain <CHAIN>        btc, bch-legacy, bch, ltc, dgb, eth
    -n, --count <N>            Number of pairs to generate
    -f, --format <FORMAT>      text, json, display
        --entropy <KEY> <SEED> Derive from explicit entropy instead of the OS RNG
        --validate             Validate configuration and exit
    -h, --help                 Show this help message
    -V, --version              Show version

ENVIRONMENT VARIABLES (override config file):
    BITADDR_CHAIN              Chain profile
    BITADDR_COUNT              Number of pairs
    BITADDR_OUTPUT_FORMAT      Output format
    BITADDR_LOG_LEVEL          Log level (error/warn/info/debug/trace)

EXAMPLES:
    # Paper-wallet style Litecoin pair
    bitaddr --chain ltc

    # Reproduce the reference vector
    bitaddr --entropy test1 test2
"#
    );
}
