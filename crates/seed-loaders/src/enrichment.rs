/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Per-coin enrichment: catalog detail, platform filter, explorer decimals.

use seed_core::types::{CoinSummary, TokenLookup};
use seed_core::ETHEREUM_PLATFORM_ID;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::SkipReason;
use crate::traits::{CatalogGateway, ExplorerGateway};
use crate::types::{EnrichedCoin, EnrichmentRules, SelectionPath};

/// Fetches and classifies one coin at a time.
#[derive(Clone)]
pub struct Enricher {
  catalog: Arc<dyn CatalogGateway>,
  explorer: Arc<dyn ExplorerGateway>,
  rules: EnrichmentRules,
}

impl Enricher {
  pub fn new(
    catalog: Arc<dyn CatalogGateway>,
    explorer: Arc<dyn ExplorerGateway>,
    rules: EnrichmentRules,
  ) -> Self {
    Self { catalog, explorer, rules }
  }

  /// Enrich `coin`, or say why it has to be left out.
  ///
  /// Transport failures on the catalog skip the coin. Explorer failures never
  /// do: a throttled lookup yields [`EnrichedCoin::RateLimited`], anything else
  /// leaves the token decimals unresolved.
  pub async fn enrich(
    &self,
    coin: &CoinSummary,
    path: SelectionPath,
  ) -> Result<EnrichedCoin, SkipReason> {
    let detail = match self.catalog.coin_detail(&coin.id).await {
      Ok(detail) => detail,
      Err(e) => {
        warn!("Error happened to {} coin: {}", coin.id, e);
        return Err(SkipReason::DetailUnavailable(e.to_string()));
      }
    };

    if path == SelectionPath::Ranked {
      let allowed = detail
        .asset_platform_id
        .as_ref()
        .is_some_and(|platform| self.rules.allowed_platforms.contains(platform));

      if !allowed {
        info!(
          "Skipping ranked coin {}: asset platform {} is not allowed",
          coin.id,
          detail.asset_platform_id.as_deref().unwrap_or("<none>")
        );
        return Err(SkipReason::UnsupportedPlatform(detail.asset_platform_id));
      }
    }

    if !detail.is_on_platform(ETHEREUM_PLATFORM_ID) {
      debug!("{} classified as standard", coin.id);
      return Ok(EnrichedCoin::Standard(detail));
    }

    let Some(address) = detail.contract_address.clone() else {
      warn!("{} is an {} token without a contract address", coin.id, ETHEREUM_PLATFORM_ID);
      return Ok(EnrichedCoin::OnChain { detail, token: None });
    };

    let token = match self.explorer.latest_token_transfer(&address).await {
      Ok(TokenLookup::Found(info)) => {
        debug!("{} has {} decimals", coin.id, info.token_decimal);
        Some(info)
      }
      Ok(TokenLookup::RateLimited) => {
        warn!("Explorer rate limit hit for {} ({}), marking for retry", detail.symbol, address);
        return Ok(EnrichedCoin::RateLimited { code: detail.symbol });
      }
      Ok(TokenLookup::NotFound) => {
        warn!("No token transfers found for contract_address {}", address);
        None
      }
      Err(e) => {
        error!("Error happened to contract_address {}: {}", address, e);
        None
      }
    };

    Ok(EnrichedCoin::OnChain { detail, token })
  }
}
