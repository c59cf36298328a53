//! Catalog and explorer data as the pipeline sees it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the catalog search listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinSummary {
  pub id: String,
  #[serde(default)]
  pub market_cap_rank: Option<u32>,
}

impl CoinSummary {
  pub fn new(id: impl Into<String>, market_cap_rank: Option<u32>) -> Self {
    Self { id: id.into(), market_cap_rank }
  }
}

/// Per-coin detail fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
  pub id: String,
  pub symbol: String,
  pub name: String,
  pub asset_platform_id: Option<String>,
  pub contract_address: Option<String>,
  pub icon_url: Option<String>,
  /// Current price keyed by lowercase currency code
  pub price_by_currency: HashMap<String, Decimal>,
}

impl CoinDetail {
  pub fn price_in(&self, currency: &str) -> Option<Decimal> {
    self.price_by_currency.get(currency).copied()
  }

  pub fn is_on_platform(&self, platform: &str) -> bool {
    self.asset_platform_id.as_deref() == Some(platform)
  }
}

/// Token metadata recovered from the latest transfer of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerTokenInfo {
  pub token_decimal: u32,
}

/// Outcome of an explorer token-transfer lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLookup {
  Found(ExplorerTokenInfo),
  /// Explorer quota exhausted
  RateLimited,
  /// The contract has no transfers
  NotFound,
}
