/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Core types, configuration and error handling shared by the seed-* crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CoinGeckoSettings, EtherscanSettings, Filters, HttpSettings, SeedConfig};
pub use error::{Error, Result};

/// Base currencies the CoinGecko `current_price` map is known to carry.
pub const SUPPORTED_BASE_CURRENCIES: &[&str] = &[
  "aed", "ars", "aud", "bch", "bdt", "bhd", "bmd", "bnb", "brl", "btc", "cad", "chf", "clp", "cny",
  "czk", "dkk", "eos", "eth", "eur", "gbp", "hkd", "huf", "idr", "ils", "inr", "jpy", "krw", "kwd",
  "lkr", "ltc", "mmk", "mxn", "myr", "nok", "nzd", "php", "pkr", "pln", "rub", "sar", "sek", "sgd",
  "thb", "try", "twd", "uah", "usd", "vef", "vnd", "xag", "xau", "xdr", "xlm", "xrp", "zar",
];

/// Placeholder written into fields an operator has to complete by hand.
pub const MANUAL_REVIEW_MARKER: &str = "CHANGEME";

/// Asset platform id whose tokens are resolved through the explorer.
pub const ETHEREUM_PLATFORM_ID: &str = "ethereum";

/// Default gas limit for ERC-20 transfers.
pub const DEFAULT_GAS_AMOUNT: u64 = 21_000;

/// Default gas price in wei (1 gwei).
pub const DEFAULT_GAS_PRICE: u64 = 1_000_000_000;

/// Largest token decimal count whose base factor still fits a signed 64-bit integer.
pub const MAX_TOKEN_DECIMALS: u32 = 18;

/// Base URL for the public CoinGecko API
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

/// Base URL for the CoinGecko pro API
pub const COINGECKO_PRO_BASE_URL: &str = "https://pro-api.coingecko.com";

/// Request rate limits (requests per minute)
pub const DEFAULT_CATALOG_RATE_LIMIT: u32 = 30;
pub const DEFAULT_EXPLORER_RATE_LIMIT: u32 = 300; // 5 calls per second on the free tier

/// Idle timeout for pooled connections, in seconds
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5;

/// Upper bound for `[http] max_retries`
pub const MAX_HTTP_RETRIES: u32 = 10;

/// Returns true when `code` is one of [`SUPPORTED_BASE_CURRENCIES`].
pub fn is_supported_base_currency(code: &str) -> bool {
  SUPPORTED_BASE_CURRENCIES.contains(&code)
}
