/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! CoinGecko catalog provider.

use async_trait::async_trait;
use rust_decimal::Decimal;
use seed_core::types::{CoinDetail, CoinSummary};
use seed_core::{CoinGeckoSettings, HttpSettings};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

use super::transport::Transport;
use crate::error::SeedResult;
use crate::traits::CatalogGateway;

const API_PREFIX: &str = "api/v3";

/// Fixed sub-resource selection for `/coins/{id}`
const DETAIL_PARAMS: [(&str, &str); 6] = [
  ("localization", "false"),
  ("tickers", "false"),
  ("market_data", "true"),
  ("community_data", "false"),
  ("developer_data", "false"),
  ("sparkline", "false"),
];

/// CoinGecko data provider.
pub struct CoinGeckoProvider {
  transport: Transport,
  base_url: String,
  api_key: Option<String>,
  auth_header: &'static str,
}

impl CoinGeckoProvider {
  pub fn new(settings: &CoinGeckoSettings, http: &HttpSettings) -> SeedResult<Self> {
    Ok(Self {
      transport: Transport::new("CoinGecko", http, http.catalog_rate_limit)?,
      base_url: settings.base_url().trim_end_matches('/').to_string(),
      api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
      auth_header: settings.auth_header(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}/{}", self.base_url, API_PREFIX, path)
  }

  fn headers(&self) -> Vec<(&'static str, String)> {
    self.api_key.iter().map(|key| (self.auth_header, key.clone())).collect()
  }
}

// Struct for /search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
  #[serde(default)]
  coins: Vec<CoinSummary>,
}

// Struct for /coins/{id} response, only the fields the seed needs
#[derive(Debug, Deserialize)]
struct CoinGeckoCoinDetail {
  id: String,
  symbol: String,
  name: String,
  #[serde(default)]
  asset_platform_id: Option<String>,
  #[serde(default)]
  contract_address: Option<String>,
  #[serde(default)]
  platforms: HashMap<String, Option<String>>,
  #[serde(default)]
  image: CoinGeckoImage,
  #[serde(default)]
  market_data: Option<CoinGeckoMarketData>,
}

#[derive(Debug, Default, Deserialize)]
struct CoinGeckoImage {
  #[serde(default)]
  small: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CoinGeckoMarketData {
  #[serde(default)]
  current_price: HashMap<String, Option<Decimal>>,
}

impl From<CoinGeckoCoinDetail> for CoinDetail {
  fn from(coin: CoinGeckoCoinDetail) -> Self {
    let asset_platform_id = coin.asset_platform_id.filter(|p| !p.is_empty());

    // Older responses carry the contract at the top level, newer ones only in `platforms`
    let contract_address = coin.contract_address.filter(|a| !a.is_empty()).or_else(|| {
      asset_platform_id
        .as_ref()
        .and_then(|platform| coin.platforms.get(platform).cloned().flatten())
        .filter(|a| !a.is_empty())
    });

    let price_by_currency = coin
      .market_data
      .map(|m| {
        m.current_price
          .into_iter()
          .filter_map(|(currency, price)| price.map(|p| (currency.to_lowercase(), p)))
          .collect()
      })
      .unwrap_or_default();

    CoinDetail {
      id: coin.id,
      symbol: coin.symbol,
      name: coin.name,
      asset_platform_id,
      contract_address,
      icon_url: coin.image.small.filter(|u| !u.is_empty()),
      price_by_currency,
    }
  }
}

#[async_trait]
impl CatalogGateway for CoinGeckoProvider {
  async fn search(&self, locale: &str) -> seed_core::Result<Vec<CoinSummary>> {
    info!("Fetching coin listing from CoinGecko /search");

    let response: SearchResponse = self
      .transport
      .get_json(&self.url("search"), &[("locale", locale.to_string())], &self.headers())
      .await?;

    info!(
      "CoinGecko listed {} coins ({} with rankings)",
      response.coins.len(),
      response.coins.iter().filter(|c| c.market_cap_rank.is_some()).count()
    );
    Ok(response.coins)
  }

  async fn coin_detail(&self, coin_id: &str) -> seed_core::Result<CoinDetail> {
    debug!("HTTP call: Fetching details for {}", coin_id);

    let query: Vec<(&str, String)> =
      DETAIL_PARAMS.iter().map(|(k, v)| (*k, v.to_string())).collect();

    let coin: CoinGeckoCoinDetail =
      self.transport.get_json(&self.url(&format!("coins/{}", coin_id)), &query, &self.headers()).await?;

    Ok(coin.into())
  }

  fn source_name(&self) -> &'static str {
    "CoinGecko"
  }
}
