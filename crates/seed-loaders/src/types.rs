/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Core types for the seed pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use seed_core::types::{CoinDetail, CoinSummary, ExplorerTokenInfo, Tariffs};
use std::collections::{BTreeMap, HashMap, HashSet};

/// How a coin got into the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionPath {
  Whitelisted,
  Ranked,
}

impl std::fmt::Display for SelectionPath {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SelectionPath::Whitelisted => write!(f, "whitelisted"),
      SelectionPath::Ranked => write!(f, "ranked"),
    }
  }
}

/// Working set produced by the selection step, both lists in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  pub whitelisted: Vec<CoinSummary>,
  pub ranked: Vec<CoinSummary>,
}

impl Selection {
  pub fn len(&self) -> usize {
    self.whitelisted.len() + self.ranked.len()
  }

  pub fn is_empty(&self) -> bool {
    self.whitelisted.is_empty() && self.ranked.is_empty()
  }

  /// Whitelisted coins first, then ranked ones: the emission order.
  pub fn iter(&self) -> impl Iterator<Item = (&CoinSummary, SelectionPath)> {
    self
      .whitelisted
      .iter()
      .map(|c| (c, SelectionPath::Whitelisted))
      .chain(self.ranked.iter().map(|c| (c, SelectionPath::Ranked)))
  }
}

/// A coin after enrichment, tagged by how its payload will be built.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedCoin {
  /// No deterministic decimals source
  Standard(CoinDetail),

  /// ERC-20 token; `token` is `None` when the explorer lookup failed
  OnChain { detail: CoinDetail, token: Option<ExplorerTokenInfo> },

  /// Explorer throttled us; only the symbol is kept
  RateLimited { code: String },
}

impl EnrichedCoin {
  pub fn code(&self) -> &str {
    match self {
      EnrichedCoin::Standard(detail) | EnrichedCoin::OnChain { detail, .. } => &detail.symbol,
      EnrichedCoin::RateLimited { code } => code,
    }
  }
}

/// Everything the assembler needs besides the coin itself.
#[derive(Debug, Clone)]
pub struct AssemblyContext {
  pub base_currency: String,
  pub tariffs: Tariffs,
  pub blockchain_mapping: HashMap<String, String>,
}

/// Rules applied while enriching coins.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentRules {
  /// Platforms a ranked coin must live on
  pub allowed_platforms: HashSet<String>,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub base_currency: String,
  pub listed: usize,
  pub whitelisted: usize,
  pub ranked: usize,
  pub emitted: usize,
  /// Set when the catalog listing could not be fetched
  pub search_error: Option<String>,
  pub rate_limited: Vec<String>,
  pub needs_review: Vec<String>,
  pub skipped: BTreeMap<&'static str, usize>,
}

impl RunReport {
  pub fn new(base_currency: &str) -> Self {
    let now = Utc::now();
    Self {
      started_at: now,
      finished_at: now,
      base_currency: base_currency.to_string(),
      listed: 0,
      whitelisted: 0,
      ranked: 0,
      emitted: 0,
      search_error: None,
      rate_limited: Vec::new(),
      needs_review: Vec::new(),
      skipped: BTreeMap::new(),
    }
  }

  pub fn total_skipped(&self) -> usize {
    self.skipped.values().sum()
  }

  pub fn elapsed_ms(&self) -> i64 {
    (self.finished_at - self.started_at).num_milliseconds()
  }
}

/// Fee and limit amounts converted into units of the coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedTariffs {
  pub deposit_fee: Decimal,
  pub min_deposit_amount: Decimal,
  pub min_collection_amount: Decimal,
  pub withdraw_fee: Decimal,
  pub min_withdraw_amount: Decimal,
  pub withdraw_limit_24h: Decimal,
  pub withdraw_limit_72h: Decimal,
}
