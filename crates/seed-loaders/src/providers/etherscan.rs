/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Etherscan explorer provider.
//!
//! Etherscan has no "token info" endpoint on the free plan, so the decimals of
//! an ERC-20 contract are read off its most recent `tokentx` transfer.

use async_trait::async_trait;
use seed_core::types::{ExplorerTokenInfo, TokenLookup};
use seed_core::{Error, EtherscanSettings, HttpSettings};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::Transport;
use crate::error::SeedResult;
use crate::traits::ExplorerGateway;

const API_SUCCESS_STATUS: &str = "1";

/// Etherscan data provider.
pub struct EtherscanProvider {
  transport: Transport,
  base_url: String,
  api_key: Option<String>,
}

impl EtherscanProvider {
  pub fn new(settings: &EtherscanSettings, http: &HttpSettings) -> SeedResult<Self> {
    if settings.api_key.is_none() {
      warn!("No Etherscan API key configured, requests will be heavily throttled");
    }

    Ok(Self {
      transport: Transport::new("Etherscan", http, http.explorer_rate_limit)?,
      base_url: settings.base_url().trim_end_matches('/').to_string(),
      api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
    })
  }
}

/// Envelope of every Etherscan response
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
  status: String,
  #[serde(default)]
  message: String,
  #[serde(default)]
  result: Value,
}

/// Map an Etherscan envelope to a lookup outcome.
fn interpret_response(response: EtherscanResponse) -> seed_core::Result<TokenLookup> {
  let result_text = response.result.as_str().unwrap_or_default().to_lowercase();

  if response.status != API_SUCCESS_STATUS {
    if result_text.contains("rate limit") || response.message.to_lowercase().contains("rate limit")
    {
      return Ok(TokenLookup::RateLimited);
    }
    if response.message.starts_with("No transactions found") {
      return Ok(TokenLookup::NotFound);
    }
    return Err(Error::Api(format!("Etherscan: {} {}", response.message, response.result)));
  }

  let Some(transfer) = response.result.as_array().and_then(|txs| txs.first()) else {
    return Ok(TokenLookup::NotFound);
  };

  let decimals = transfer
    .get("tokenDecimal")
    .and_then(|d| match d {
      Value::String(s) => s.trim().parse::<u32>().ok(),
      Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
      _ => None,
    })
    .ok_or_else(|| Error::MissingField("tokenDecimal".to_string()))?;

  Ok(TokenLookup::Found(ExplorerTokenInfo { token_decimal: decimals }))
}

#[async_trait]
impl ExplorerGateway for EtherscanProvider {
  async fn latest_token_transfer(&self, contract_address: &str) -> seed_core::Result<TokenLookup> {
    debug!("HTTP call: Fetching latest token transfer for {}", contract_address);

    let mut query = vec![
      ("module", "account".to_string()),
      ("action", "tokentx".to_string()),
      ("contractaddress", contract_address.to_string()),
      ("page", "1".to_string()),
      ("offset", "1".to_string()),
      ("sort", "desc".to_string()),
    ];
    if let Some(key) = &self.api_key {
      query.push(("apikey", key.clone()));
    }

    let response: EtherscanResponse =
      match self.transport.get_json(&format!("{}/api", self.base_url), &query, &[]).await {
        Ok(response) => response,
        Err(e) if e.is_rate_limit() => return Ok(TokenLookup::RateLimited),
        Err(e) => return Err(e),
      };

    interpret_response(response)
  }

  fn source_name(&self) -> &'static str {
    "Etherscan"
  }
}
