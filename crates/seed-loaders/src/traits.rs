/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Seams between the seed pipeline and the outside world.
//!
//! The pipeline only talks to these traits, so the HTTP providers in
//! [`crate::providers`] can be swapped for fakes in tests.

use async_trait::async_trait;
use seed_core::types::{CoinDetail, CoinSummary, SeedEntry, TokenLookup};
use std::path::Path;

use crate::error::SeedResult;

/// Coin catalog (CoinGecko).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
  /// Listing of coin ids with their market cap rank.
  async fn search(&self, locale: &str) -> seed_core::Result<Vec<CoinSummary>>;

  /// Detail for one coin, including current prices.
  async fn coin_detail(&self, coin_id: &str) -> seed_core::Result<CoinDetail>;

  /// Get the name of this data source.
  fn source_name(&self) -> &'static str;
}

/// Blockchain explorer (Etherscan).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExplorerGateway: Send + Sync {
  /// Most recent token transfer of `contract_address`, reduced to its decimals.
  async fn latest_token_transfer(&self, contract_address: &str)
  -> seed_core::Result<TokenLookup>;

  /// Get the name of this data source.
  fn source_name(&self) -> &'static str;
}

/// Terminal sink for the assembled entries.
#[cfg_attr(test, mockall::automock)]
pub trait SeedWriter: Send + Sync {
  fn write(&self, path: &Path, entries: &[SeedEntry]) -> SeedResult<()>;
}
