//! Configuration management for the seed prefetcher

use crate::error::{Error, Result};
use crate::types::{ExplorerNetwork, Tariffs};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::{Path, PathBuf};

/// Main configuration struct, usually read from `config/seed.toml`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
  /// Reference currency for prices and tariffs (lowercase CoinGecko code)
  pub base_currency: String,

  /// File name of the generated seed
  pub seed_filename: String,

  /// Directory the seed file is written into
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Coin selection filters
  pub filters: Filters,

  /// Asset platform id -> blockchain key
  #[serde(default)]
  pub blockchain_mapping: HashMap<String, String>,

  /// Fee and limit amounts in the base currency
  #[serde(alias = "tarrifs")]
  pub tariffs: Tariffs,

  #[serde(default)]
  pub etherscan: EtherscanSettings,

  #[serde(default)]
  pub coingecko: CoinGeckoSettings,

  #[serde(default)]
  pub http: HttpSettings,
}

/// Which coins make it into the seed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Filters {
  /// Coins that are always included
  #[serde(default)]
  pub coingecko_ids: Vec<String>,

  /// Highest market cap rank a non-whitelisted coin may have
  #[serde(default)]
  pub market_cap_rank: u32,

  /// Asset platforms a ranked coin must live on
  #[serde(default)]
  pub asset_platform_ids: Vec<String>,
}

impl Filters {
  pub fn whitelist(&self) -> HashSet<String> {
    self.coingecko_ids.iter().cloned().collect()
  }

  pub fn allowed_platforms(&self) -> HashSet<String> {
    self.asset_platform_ids.iter().cloned().collect()
  }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EtherscanSettings {
  pub api_key: Option<String>,

  #[serde(default)]
  pub network: ExplorerNetwork,

  /// Overrides the network URL, mostly for tests
  pub endpoint: Option<String>,
}

impl EtherscanSettings {
  pub fn base_url(&self) -> String {
    self.endpoint.clone().unwrap_or_else(|| self.network.base_url().to_string())
  }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CoinGeckoSettings {
  pub api_key: Option<String>,

  /// Use the pro API host and header
  #[serde(default)]
  pub pro: bool,

  /// Overrides the API host, mostly for tests
  pub endpoint: Option<String>,
}

impl CoinGeckoSettings {
  pub fn base_url(&self) -> String {
    match (&self.endpoint, self.pro) {
      (Some(endpoint), _) => endpoint.clone(),
      (None, true) => crate::COINGECKO_PRO_BASE_URL.to_string(),
      (None, false) => crate::COINGECKO_BASE_URL.to_string(),
    }
  }

  /// Header carrying the API key for the selected plan
  pub fn auth_header(&self) -> &'static str {
    if self.pro { "x-cg-pro-api-key" } else { "x-cg-demo-api-key" }
  }
}

/// Network behaviour shared by both gateways.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpSettings {
  /// Idle timeout for pooled connections
  pub idle_timeout_secs: u64,

  /// Per request timeout
  pub timeout_secs: u64,

  /// Retries for connection failures and 5xx responses
  pub max_retries: u32,

  /// Base delay of the exponential backoff
  pub retry_delay_ms: u64,

  /// Catalog requests per minute
  pub catalog_rate_limit: u32,

  /// Explorer requests per minute
  pub explorer_rate_limit: u32,
}

impl Default for HttpSettings {
  fn default() -> Self {
    Self {
      idle_timeout_secs: crate::DEFAULT_IDLE_TIMEOUT_SECS,
      timeout_secs: 30,
      max_retries: 2,
      retry_delay_ms: 1000,
      catalog_rate_limit: crate::DEFAULT_CATALOG_RATE_LIMIT,
      explorer_rate_limit: crate::DEFAULT_EXPLORER_RATE_LIMIT,
    }
  }
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("config/seed")
}

impl SeedConfig {
  /// Load configuration from a TOML file, then apply environment overrides
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    dotenv().ok();

    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
      .map_err(|e| Error::Config(format!("Could not read {}: {}", path.display(), e)))?;

    let mut config = Self::from_toml_str(&contents)?;
    config.apply_env_overrides()?;
    Ok(config)
  }

  /// Parse configuration from TOML text without touching the environment
  pub fn from_toml_str(contents: &str) -> Result<Self> {
    let mut config: SeedConfig = toml::from_str(contents)?;
    config.base_currency = config.base_currency.trim().to_lowercase();
    Ok(config)
  }

  /// Environment variables win over the file for secrets and the base currency
  pub fn apply_env_overrides(&mut self) -> Result<()> {
    if let Ok(key) = env::var("ETHERSCAN_API_KEY") {
      self.etherscan.api_key = Some(key);
    }

    if let Ok(key) = env::var("COINGECKO_API_KEY") {
      self.coingecko.api_key = Some(key);
    }

    if let Ok(currency) = env::var("SEED_BASE_CURRENCY") {
      if currency.trim().is_empty() {
        return Err(Error::Config("SEED_BASE_CURRENCY is empty".to_string()));
      }
      self.base_currency = currency.trim().to_lowercase();
    }

    Ok(())
  }

  /// Fails when the base currency is not one the catalog prices in
  pub fn check_base_currency(&self) -> Result<()> {
    if crate::is_supported_base_currency(&self.base_currency) {
      Ok(())
    } else {
      Err(Error::UnsupportedBaseCurrency(self.base_currency.clone()))
    }
  }

  /// Full validation used before a run
  pub fn validate(&self) -> Result<()> {
    self.check_base_currency()?;

    if self.seed_filename.trim().is_empty() {
      return Err(Error::Config("seed_filename must not be empty".to_string()));
    }

    if self.http.catalog_rate_limit == 0 || self.http.explorer_rate_limit == 0 {
      return Err(Error::Config("rate limits must be greater than zero".to_string()));
    }

    if self.http.max_retries > crate::MAX_HTTP_RETRIES {
      return Err(Error::Config(format!(
        "max_retries must be at most {}, got {}",
        crate::MAX_HTTP_RETRIES,
        self.http.max_retries
      )));
    }

    if self.tariffs.has_negative() {
      return Err(Error::Config("tariffs must not be negative".to_string()));
    }

    url::Url::parse(&self.coingecko.base_url())
      .map_err(|e| Error::Config(format!("Invalid CoinGecko endpoint: {}", e)))?;
    url::Url::parse(&self.etherscan.base_url())
      .map_err(|e| Error::Config(format!("Invalid Etherscan endpoint: {}", e)))?;

    Ok(())
  }

  /// Where the seed file ends up
  pub fn output_path(&self) -> PathBuf {
    self.output_dir.join(&self.seed_filename)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use std::io::Write;

  const SAMPLE: &str = r#"
base_currency = "USD"
seed_filename = "currencies.toml"

[filters]
coingecko_ids = ["bitcoin", "tether"]
market_cap_rank = 100
asset_platform_ids = ["ethereum"]

[blockchain_mapping]
ethereum = "eth-mainnet"

[tarrifs]
deposit_fee = 0
min_deposit_amount = 10
min_collection_amount = 10
withdraw_fee = 1.5
min_withdraw_amount = 20
withdraw_limit_24h = 10000
withdraw_limit_72h = 50000

[etherscan]
api_key = "file-key"
network = "sepolia"
"#;

  #[test]
  fn test_from_toml_str() {
    let config = SeedConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.base_currency, "usd");
    assert_eq!(config.filters.market_cap_rank, 100);
    assert_eq!(config.filters.whitelist().len(), 2);
    assert_eq!(config.blockchain_mapping.get("ethereum").unwrap(), "eth-mainnet");
    assert_eq!(config.tariffs.withdraw_fee, dec!(1.5));
    assert_eq!(config.etherscan.network, ExplorerNetwork::Sepolia);
    assert_eq!(config.http.idle_timeout_secs, 5);
    assert_eq!(config.output_path(), PathBuf::from("config/seed/currencies.toml"));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_unsupported_base_currency() {
    let text = SAMPLE.replace("\"USD\"", "\"abcd\"");
    let config = SeedConfig::from_toml_str(&text).unwrap();
    let err = config.check_base_currency().unwrap_err();
    assert!(matches!(err, Error::UnsupportedBaseCurrency(ref c) if c == "abcd"));
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_tariffs_key_spellings() {
    let text = SAMPLE.replace("[tarrifs]", "[tariffs]");
    let config = SeedConfig::from_toml_str(&text).unwrap();
    assert_eq!(config.tariffs.min_deposit_amount, dec!(10));
  }

  #[test]
  fn test_coingecko_plan() {
    let mut settings = CoinGeckoSettings::default();
    assert_eq!(settings.base_url(), crate::COINGECKO_BASE_URL);
    assert_eq!(settings.auth_header(), "x-cg-demo-api-key");

    settings.pro = true;
    assert_eq!(settings.base_url(), crate::COINGECKO_PRO_BASE_URL);
    assert_eq!(settings.auth_header(), "x-cg-pro-api-key");

    settings.endpoint = Some("http://127.0.0.1:9000".to_string());
    assert_eq!(settings.base_url(), "http://127.0.0.1:9000");
  }

  #[test]
  fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = SeedConfig::load(file.path()).unwrap();
    assert_eq!(config.seed_filename, "currencies.toml");
  }

  #[test]
  fn test_load_missing_file() {
    let err = SeedConfig::load("/nonexistent/seed.toml").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
  }

  #[test]
  fn test_negative_tariff_rejected() {
    let text = SAMPLE.replace("withdraw_fee = 1.5", "withdraw_fee = -1.5");
    let config = SeedConfig::from_toml_str(&text).unwrap();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
  }

  #[test]
  fn test_max_retries_bounded() {
    let mut config = SeedConfig::from_toml_str(SAMPLE).unwrap();
    config.http.max_retries = crate::MAX_HTTP_RETRIES;
    assert!(config.validate().is_ok());

    config.http.max_retries = 40;
    assert!(matches!(config.validate(), Err(Error::Config(ref m)) if m.contains("max_retries")));
  }

  #[test]
  fn test_example_config_is_valid() {
    let text = include_str!("../../../config/seed.example.toml");
    let config = SeedConfig::from_toml_str(text).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.http.explorer_rate_limit, 300);
  }
}
