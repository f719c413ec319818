//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.
//! Every section has defaults, so an empty file is a valid LABS/SOL setup.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::birdeye::{BirdeyeConfig, BIRDEYE_API_URL};
use crate::adapters::market_data::JUPITER_PRICE_API;
use crate::application::StatusConfig;
use crate::domain::{KnownToken, Rotation, TokenAddress, TokenRegistry};

/// Environment variable holding the Birdeye API key
pub const BIRDEYE_API_KEY_ENV: &str = "BIRDEYE_API_KEY";

pub const LABS_MINT: &str = "LABSh5DTebUcUbEoLzXKCiXFJLecDFiDWiBGUU1GpxR";
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub status: StatusSection,
    #[serde(default)]
    pub tokens: TokensSection,
    #[serde(default)]
    pub providers: ProvidersSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Status rotation configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusSection {
    /// Seconds between rotation ticks
    pub interval_secs: u64,
    /// Token symbols cycled by the status display
    pub rotation: Vec<String>,
    /// Decimal places of the price shown as display name
    pub display_decimals: usize,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            rotation: vec!["LABS".to_string()],
            display_decimals: 4,
        }
    }
}

/// One known token entry
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub symbol: String,
    pub address: String,
}

/// Tokens configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokensSection {
    /// Symbol of the token prices are compared against
    pub reference: String,
    /// Known tokens; the first one is the fallback for unknown rotation entries
    pub known: Vec<TokenEntry>,
}

impl Default for TokensSection {
    fn default() -> Self {
        Self {
            reference: "SOL".to_string(),
            known: vec![
                TokenEntry { symbol: "LABS".to_string(), address: LABS_MINT.to_string() },
                TokenEntry { symbol: "SOL".to_string(), address: SOL_MINT.to_string() },
            ],
        }
    }
}

/// Market data providers configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    /// Jupiter price API endpoint
    pub jupiter_price_url: String,
    /// Birdeye public API base URL
    pub birdeye_api_url: String,
    /// Birdeye API key (prefer the BIRDEYE_API_KEY env var)
    pub birdeye_api_key: Option<String>,
    /// Chain sent to Birdeye
    pub chain: String,
    /// Price history candle type
    pub history_resolution: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            jupiter_price_url: JUPITER_PRICE_API.to_string(),
            birdeye_api_url: BIRDEYE_API_URL.to_string(),
            birdeye_api_key: None,
            chain: "solana".to_string(),
            history_resolution: "1H".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProvidersSection {
    /// Get Birdeye API key with environment variable override
    /// Checks BIRDEYE_API_KEY env var first, falls back to config value
    pub fn get_birdeye_api_key(&self) -> Option<String> {
        std::env::var(BIRDEYE_API_KEY_ENV)
            .ok()
            .or_else(|| self.birdeye_api_key.clone())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn birdeye_config(&self) -> BirdeyeConfig {
        BirdeyeConfig {
            base_url: self.birdeye_api_url.trim_end_matches('/').to_string(),
            api_key: self.get_birdeye_api_key(),
            chain: self.chain.clone(),
            history_resolution: self.history_resolution.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Presentation configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Decimal places for currency figures
    pub price_decimal_places: usize,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { price_decimal_places: 2 }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate status section
        if self.status.interval_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "interval_secs must be > 0, got {}",
                self.status.interval_secs
            )));
        }

        if self.status.rotation.is_empty() {
            return Err(ConfigError::ValidationError(
                "rotation cannot be empty".to_string(),
            ));
        }

        if self.status.display_decimals > 12 {
            return Err(ConfigError::ValidationError(format!(
                "display_decimals must be 0-12, got {}",
                self.status.display_decimals
            )));
        }

        // Validate tokens
        let registry = self.token_registry()?;
        if registry.get(&self.tokens.reference).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "reference token '{}' is not a known token",
                self.tokens.reference
            )));
        }

        // Validate providers
        if self.providers.jupiter_price_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "jupiter_price_url cannot be empty".to_string(),
            ));
        }

        if self.providers.birdeye_api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "birdeye_api_url cannot be empty".to_string(),
            ));
        }

        if self.providers.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.display.price_decimal_places > 12 {
            return Err(ConfigError::ValidationError(format!(
                "price_decimal_places must be 0-12, got {}",
                self.display.price_decimal_places
            )));
        }

        Ok(())
    }

    /// Known tokens as a registry, first entry is the fallback
    pub fn token_registry(&self) -> Result<TokenRegistry, ConfigError> {
        let tokens = self
            .tokens
            .known
            .iter()
            .map(|entry| {
                let address = TokenAddress::new(entry.address.as_str())
                    .map_err(|e| ConfigError::ValidationError(format!("{}: {}", entry.symbol, e)))?;
                KnownToken::new(entry.symbol.as_str(), address)
                    .map_err(|e| ConfigError::ValidationError(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        TokenRegistry::new(tokens).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    pub fn reference_token(&self) -> Result<KnownToken, ConfigError> {
        self.token_registry()?
            .get(&self.tokens.reference)
            .cloned()
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "reference token '{}' is not a known token",
                    self.tokens.reference
                ))
            })
    }

    pub fn rotation(&self) -> Result<Rotation, ConfigError> {
        Rotation::new(self.status.rotation.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    pub fn status_config(&self) -> StatusConfig {
        StatusConfig {
            interval: Duration::from_secs(self.status.interval_secs),
            display_decimals: self.status.display_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = assert_ok!(parse_config(""));
        assert_eq!(config.status.interval_secs, 60);
        assert_eq!(config.status.rotation, vec!["LABS".to_string()]);
        assert_eq!(config.reference_token().unwrap().address.as_str(), SOL_MINT);
        assert_eq!(config.token_registry().unwrap().default_token().symbol, "LABS");
        assert_eq!(config.display.price_decimal_places, 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[status]
interval_secs = 30
rotation = ["LABS", "SOL"]

[tokens]
reference = "sol"
known = [
    {{ symbol = "LABS", address = "{}" }},
    {{ symbol = "SOL", address = "{}" }},
]

[providers]
history_resolution = "1D"
"#,
            LABS_MINT, SOL_MINT
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.status.interval_secs, 30);
        assert_eq!(config.rotation().unwrap().len(), 2);
        assert_eq!(config.reference_token().unwrap().symbol, "SOL");
        assert_eq!(config.providers.history_resolution, "1D");
        assert_eq!(config.providers.chain, "solana");
        assert_eq!(config.status_config().interval, Duration::from_secs(30));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert_err!(parse_config("[status]\ninterval_secs = 0\n"));
        assert_err!(parse_config("[status]\nrotation = []\n"));
        assert_err!(parse_config("[tokens]\nreference = \"BONK\"\n"));
        assert_err!(parse_config("[tokens]\nknown = []\n"));
        assert_err!(parse_config(
            "[tokens]\nreference = \"SOL\"\nknown = [{ symbol = \"SOL\", address = \"\" }]\n"
        ));
        assert_err!(parse_config("[providers]\ntimeout_secs = 0\n"));
    }

    #[test]
    fn test_unknown_rotation_entry_is_allowed() {
        let config = assert_ok!(parse_config("[status]\nrotation = [\"WATTLABS\"]\n"));
        let registry = config.token_registry().unwrap();
        assert!(registry.resolve(&config.status.rotation[0]).is_fallback());
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = assert_ok!(parse_config(include_str!("../../config/ticker.toml")));
        assert_eq!(config.rotation().unwrap().len(), 2);
        assert_eq!(config.token_registry().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/ticker.toml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_birdeye_key_env_override() {
        let section = ProvidersSection {
            birdeye_api_url: "https://public-api.birdeye.so/".to_string(),
            birdeye_api_key: Some("  file-key  ".to_string()),
            ..Default::default()
        };

        std::env::set_var(BIRDEYE_API_KEY_ENV, "env-key");
        assert_eq!(section.get_birdeye_api_key().as_deref(), Some("env-key"));

        std::env::remove_var(BIRDEYE_API_KEY_ENV);
        let birdeye = section.birdeye_config();
        assert_eq!(birdeye.base_url, "https://public-api.birdeye.so");
        assert_eq!(birdeye.api_key.as_deref(), Some("file-key"));

        let blank = ProvidersSection {
            birdeye_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.get_birdeye_api_key(), None);
    }
}
