//! Output records written to the seed file.

use crate::MANUAL_REVIEW_MARKER;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scaling factor between a token's smallest unit and its display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BaseFactorRepr", into = "BaseFactorRepr")]
pub enum BaseFactor {
  Known(u64),
  NeedsReview,
}

impl BaseFactor {
  /// `10^decimals`, or `NeedsReview` when it does not fit an i64
  pub fn from_decimals(decimals: u32) -> Self {
    if decimals > crate::MAX_TOKEN_DECIMALS {
      return BaseFactor::NeedsReview;
    }
    10u64.checked_pow(decimals).map(BaseFactor::Known).unwrap_or(BaseFactor::NeedsReview)
  }

  pub fn needs_review(&self) -> bool {
    matches!(self, BaseFactor::NeedsReview)
  }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BaseFactorRepr {
  Known(u64),
  Marker(String),
}

impl From<BaseFactor> for BaseFactorRepr {
  fn from(value: BaseFactor) -> Self {
    match value {
      BaseFactor::Known(factor) => BaseFactorRepr::Known(factor),
      BaseFactor::NeedsReview => BaseFactorRepr::Marker(MANUAL_REVIEW_MARKER.to_string()),
    }
  }
}

impl TryFrom<BaseFactorRepr> for BaseFactor {
  type Error = String;

  fn try_from(value: BaseFactorRepr) -> Result<Self, Self::Error> {
    match value {
      BaseFactorRepr::Known(factor) => Ok(BaseFactor::Known(factor)),
      BaseFactorRepr::Marker(marker) if marker == MANUAL_REVIEW_MARKER => {
        Ok(BaseFactor::NeedsReview)
      }
      BaseFactorRepr::Marker(other) => Err(format!("invalid base_factor: {}", other)),
    }
  }
}

/// Provider options attached to each currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gas_amount: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gas_price: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub erc20_contract_address: Option<String>,
  pub coingecko_id: String,
  pub base_currency: String,
  pub price: Decimal,
}

/// A fully assembled currency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
  pub id: String,
  pub name: String,
  pub blockchain_key: String,
  pub symbol: String,
  #[serde(rename = "type")]
  pub currency_type: String,
  pub deposit_fee: Decimal,
  pub min_deposit_amount: Decimal,
  pub min_collection_amount: Decimal,
  pub withdraw_fee: Decimal,
  pub min_withdraw_amount: Decimal,
  pub withdraw_limit_24h: Decimal,
  pub withdraw_limit_72h: Decimal,
  pub position: u32,
  pub visible: bool,
  pub deposit_enabled: bool,
  pub withdrawal_enabled: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon_url: Option<String>,
  pub precision: u32,
  pub base_factor: BaseFactor,
  pub options: CurrencyOptions,
}

/// Placeholder for a coin whose explorer lookup was throttled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitedEntry {
  pub code: String,
  pub rate_limited: bool,
}

impl RateLimitedEntry {
  pub fn new(code: impl Into<String>) -> Self {
    Self { code: code.into(), rate_limited: true }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedEntry {
  Currency(CurrencyRecord),
  RateLimited(RateLimitedEntry),
}

impl SeedEntry {
  pub fn code(&self) -> &str {
    match self {
      SeedEntry::Currency(record) => &record.id,
      SeedEntry::RateLimited(entry) => &entry.code,
    }
  }

  pub fn position(&self) -> Option<u32> {
    match self {
      SeedEntry::Currency(record) => Some(record.position),
      SeedEntry::RateLimited(_) => None,
    }
  }

  pub fn as_currency(&self) -> Option<&CurrencyRecord> {
    match self {
      SeedEntry::Currency(record) => Some(record),
      SeedEntry::RateLimited(_) => None,
    }
  }
}

/// Top level of the seed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
  #[serde(default)]
  pub currencies: Vec<SeedEntry>,
}
