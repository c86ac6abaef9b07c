//! CLI configuration, parsed from TOML file + environment variable overrides.
//!
//! Priority: command-line flags > environment variables > config file > defaults.

use anyhow::{Context, Result};
use bitaddr_core::Chain;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletSection,

    #[serde(default)]
    pub entropy: EntropySection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// What to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSection {
    /// Chain profile name (btc, bch-legacy, bch, ltc, dgb, eth)
    #[serde(default = "default_chain")]
    pub chain: Chain,

    /// Number of address/key pairs per run
    #[serde(default = "default_count")]
    pub count: u32,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            count: default_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropySource {
    /// Operating-system CSPRNG
    Os,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropySection {
    #[serde(default = "default_entropy_source")]
    pub source: EntropySource,

    /// Random bytes drawn per entropy input
    #[serde(default = "default_entropy_bytes")]
    pub bytes: usize,
}

impl Default for EntropySection {
    fn default() -> Self {
        Self {
            source: default_entropy_source(),
            bytes: default_entropy_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled lines
    Text,
    /// One JSON object per pair
    Json,
    /// Alphanumeric only, wrapped for a character display
    Display,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "display" => Ok(OutputFormat::Display),
            other => anyhow::bail!("Unknown output format: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Columns per line for the `display` format
    #[serde(default = "default_display_columns")]
    pub display_columns: usize,

    /// Print CashAddr addresses without the `bitcoincash:` prefix
    #[serde(default)]
    pub strip_cashaddr_prefix: bool,

    /// Decode every output again before printing it
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            display_columns: default_display_columns(),
            strip_cashaddr_prefix: false,
            verify: default_verify(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_chain() -> Chain {
    Chain::Btc
}

fn default_count() -> u32 {
    1
}

fn default_entropy_source() -> EntropySource {
    EntropySource::Os
}

fn default_entropy_bytes() -> usize {
    32
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_display_columns() -> usize {
    20
}

fn default_verify() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `BITADDR_CHAIN`
    /// - `BITADDR_COUNT`
    /// - `BITADDR_OUTPUT_FORMAT`
    /// - `BITADDR_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("BITADDR_CHAIN") {
            self.wallet.chain = v
                .parse::<Chain>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Invalid BITADDR_CHAIN")?;
        }
        if let Ok(v) = std::env::var("BITADDR_COUNT") {
            self.wallet.count = v.parse::<u32>().context("Invalid BITADDR_COUNT")?;
        }
        if let Ok(v) = std::env::var("BITADDR_OUTPUT_FORMAT") {
            self.output.format = v.parse().context("Invalid BITADDR_OUTPUT_FORMAT")?;
        }
        if let Ok(v) = std::env::var("BITADDR_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(())
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.wallet.count > 0, "wallet.count must be > 0");

        // Fewer than 16 bytes cannot reach the 128-bit security level
        anyhow::ensure!(
            self.entropy.bytes >= 16,
            "entropy.bytes must be >= 16"
        );

        if self.output.format == OutputFormat::Display {
            anyhow::ensure!(
                self.output.display_columns > 0,
                "output.display_columns must be > 0"
            );
        }

        anyhow::ensure!(
            matches!(
                self.logging.level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace" | "off"
            ),
            "logging.level must be one of error/warn/info/debug/trace/off"
        );

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    /// Serializes tests that touch process environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn full_toml() -> &'static str {
        r#"
[wallet]
chain = "ltc"
count = 5

[entropy]
source = "os"
bytes = 64

[output]
format = "display"
display_columns = 16
strip_cashaddr_prefix = true
verify = false

[logging]
level = "debug"
"#
    }

    fn load(toml: &str) -> Config {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", toml).unwrap();
        Config::from_file(file.path()).unwrap()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load("");
        assert_eq!(config.wallet.chain, Chain::Btc);
        assert_eq!(config.wallet.count, 1);
        assert_eq!(config.entropy.source, EntropySource::Os);
        assert_eq!(config.entropy.bytes, 32);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.display_columns, 20);
        assert!(config.output.verify);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = load(full_toml());
        assert_eq!(config.wallet.chain, Chain::Ltc);
        assert_eq!(config.wallet.count, 5);
        assert_eq!(config.entropy.bytes, 64);
        assert_eq!(config.output.format, OutputFormat::Display);
        assert_eq!(config.output.display_columns, 16);
        assert!(config.output.strip_cashaddr_prefix);
        assert!(!config.output.verify);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_chain_aliases_in_toml() {
        let config = load("[wallet]\nchain = \"bch\"\n");
        assert_eq!(config.wallet.chain, Chain::BchCashAddr);
    }

    #[test]
    fn test_toml_accepts_cli_chain_names() {
        for (name, chain) in [
            ("BTC", Chain::Btc),
            ("ethereum", Chain::Eth),
            ("bch-cashaddr", Chain::BchCashAddr),
            ("litecoin", Chain::Ltc),
        ] {
            let config = load(&format!("[wallet]\nchain = \"{}\"\n", name));
            assert_eq!(config.wallet.chain, chain, "{}", name);
            assert_eq!(name.parse::<Chain>().unwrap(), chain);
        }
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[wallet]\nchain = \"doge\"\n").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file(Path::new("/nonexistent/bitaddr.toml")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut config = load("");

        std::env::set_var("BITADDR_CHAIN", "eth");
        std::env::set_var("BITADDR_COUNT", "3");
        std::env::set_var("BITADDR_OUTPUT_FORMAT", "json");

        let result = config.apply_env_overrides();

        std::env::remove_var("BITADDR_CHAIN");
        std::env::remove_var("BITADDR_COUNT");
        std::env::remove_var("BITADDR_OUTPUT_FORMAT");

        result.unwrap();
        assert_eq!(config.wallet.chain, Chain::Eth);
        assert_eq!(config.wallet.count, 3);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_env_override_is_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut config = load("");

        std::env::set_var("BITADDR_COUNT", "many");
        let result = config.apply_env_overrides();
        std::env::remove_var("BITADDR_COUNT");

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_count() {
        let config = load("[wallet]\ncount = 0\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_short_entropy() {
        let config = load("[entropy]\nbytes = 8\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_log_level() {
        let config = load("[logging]\nlevel = \"loud\"\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = load(full_toml());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.wallet.chain, config.wallet.chain);
        assert_eq!(reparsed.output.format, config.output.format);
    }
}
