/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! End-to-end seed run: search, select, enrich, assemble, write.

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use seed_core::types::SeedEntry;
use seed_core::{SeedConfig, MANUAL_REVIEW_MARKER};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::assembler::assemble;
use crate::enrichment::Enricher;
use crate::error::SeedResult;
use crate::selection::select;
use crate::traits::{CatalogGateway, ExplorerGateway, SeedWriter};
use crate::types::{AssemblyContext, EnrichmentRules, RunReport};

/// Locale passed to the catalog search
const SEARCH_LOCALE: &str = "en";

/// Orchestrates one seed run against the configured gateways.
pub struct SeedPipeline {
  config: SeedConfig,
  catalog: Arc<dyn CatalogGateway>,
  explorer: Arc<dyn ExplorerGateway>,
  writer: Arc<dyn SeedWriter>,
  show_progress: bool,
}

impl SeedPipeline {
  pub fn new(
    config: SeedConfig,
    catalog: Arc<dyn CatalogGateway>,
    explorer: Arc<dyn ExplorerGateway>,
    writer: Arc<dyn SeedWriter>,
  ) -> Self {
    Self { config, catalog, explorer, writer, show_progress: false }
  }

  pub fn with_progress(mut self, show_progress: bool) -> Self {
    self.show_progress = show_progress;
    self
  }

  /// Run the whole pipeline and write to `output` unless `dry_run` is set.
  ///
  /// An unsupported base currency fails before any network call. A failed
  /// catalog search leaves the listing empty, so an empty seed is still
  /// written. Per-coin failures only drop that coin.
  pub async fn run(&self, output: &Path, dry_run: bool) -> SeedResult<(Vec<SeedEntry>, RunReport)> {
    self.config.check_base_currency()?;

    let base_currency = self.config.base_currency.clone();
    let mut report = RunReport::new(&base_currency);

    // A failed search still yields an (empty) seed file
    let listing = match self.catalog.search(SEARCH_LOCALE).await {
      Ok(listing) => listing,
      Err(e) => {
        error!("Catalog search failed, continuing with an empty listing: {}", e);
        report.search_error = Some(e.to_string());
        Vec::new()
      }
    };
    report.listed = listing.len();

    let filters = &self.config.filters;
    let selection = select(&listing, &filters.whitelist(), filters.market_cap_rank);
    report.whitelisted = selection.whitelisted.len();
    report.ranked = selection.ranked.len();
    info!(
      "Selected {} coins from {} listed ({} whitelisted, {} ranked <= {})",
      selection.len(),
      report.listed,
      report.whitelisted,
      report.ranked,
      filters.market_cap_rank
    );

    let enricher = Enricher::new(
      Arc::clone(&self.catalog),
      Arc::clone(&self.explorer),
      EnrichmentRules { allowed_platforms: filters.allowed_platforms() },
    );
    let context = AssemblyContext {
      base_currency,
      tariffs: self.config.tariffs.clone(),
      blockchain_mapping: self.config.blockchain_mapping.clone(),
    };

    let progress = self.progress_bar(selection.len() as u64);
    let mut entries = Vec::with_capacity(selection.len());
    let mut position: u32 = 0;

    for (coin, path) in selection.iter() {
      progress.set_message(coin.id.clone());

      let outcome = match enricher.enrich(coin, path).await {
        Ok(enriched) => assemble(&enriched, position + 1, &context),
        Err(reason) => Err(reason),
      };

      match outcome {
        Ok(entry) => {
          match &entry {
            SeedEntry::Currency(record) => {
              position += 1;
              if record.base_factor.needs_review() || record.blockchain_key == MANUAL_REVIEW_MARKER {
                report.needs_review.push(record.id.clone());
              }
            }
            SeedEntry::RateLimited(placeholder) => {
              report.rate_limited.push(placeholder.code.clone());
            }
          }
          entries.push(entry);
        }
        Err(reason) => {
          info!("Skipped {} ({}): {}", coin.id, path, reason);
          *report.skipped.entry(reason.label()).or_insert(0) += 1;
        }
      }

      progress.inc(1);
    }

    progress.finish_and_clear();
    report.emitted = entries.len();

    if dry_run {
      info!("Dry run: {} entries not written to {}", entries.len(), output.display());
    } else {
      self.writer.write(output, &entries)?;
    }

    report.finished_at = Utc::now();
    log_summary(&report);

    Ok((entries, report))
  }

  fn progress_bar(&self, len: u64) -> ProgressBar {
    if !self.show_progress {
      return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
      .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
    {
      progress.set_style(style.progress_chars("##-"));
    }
    progress
  }
}

fn log_summary(report: &RunReport) {
  info!(
    "Seed run for {} finished in {}ms: {} emitted, {} rate limited, {} skipped",
    report.base_currency,
    report.elapsed_ms(),
    report.emitted,
    report.rate_limited.len(),
    report.total_skipped()
  );

  if let Some(e) = &report.search_error {
    error!("Catalog search failed, the seed is empty: {}", e);
  }

  for (reason, count) in &report.skipped {
    info!("  skipped {}: {}", reason, count);
  }

  if !report.rate_limited.is_empty() {
    warn!("Rate limited, rerun later for: {}", report.rate_limited.join(", "));
  }

  if !report.needs_review.is_empty() {
    warn!(
      "{} entries still contain {} fields: {}",
      report.needs_review.len(),
      MANUAL_REVIEW_MARKER,
      report.needs_review.join(", ")
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::SeedError;
  use crate::traits::{MockCatalogGateway, MockExplorerGateway, MockSeedWriter};
  use rust_decimal_macros::dec;
  use seed_core::types::{CoinDetail, CoinSummary, ExplorerTokenInfo, TokenLookup};
  use std::collections::HashMap;
  use std::path::PathBuf;

  const CONFIG: &str = r#"
base_currency = "usd"
seed_filename = "currencies.toml"

[filters]
coingecko_ids = ["dai"]
market_cap_rank = 10
asset_platform_ids = ["ethereum"]

[blockchain_mapping]
ethereum = "eth-mainnet"

[tariffs]
withdraw_fee = 2
"#;

  fn config() -> SeedConfig {
    SeedConfig::from_toml_str(CONFIG).unwrap()
  }

  fn detail(id: &str, symbol: &str, platform: Option<&str>) -> CoinDetail {
    CoinDetail {
      id: id.to_string(),
      symbol: symbol.to_string(),
      name: id.to_string(),
      asset_platform_id: platform.map(str::to_string),
      contract_address: platform.map(|_| format!("0x{}", id)),
      icon_url: None,
      price_by_currency: HashMap::from([("usd".to_string(), dec!(2))]),
    }
  }

  fn listing() -> Vec<CoinSummary> {
    vec![
      CoinSummary::new("tether", Some(3)),
      CoinSummary::new("chainlink", Some(8)),
      CoinSummary::new("dai", None),
      CoinSummary::new("far-away", Some(500)),
    ]
  }

  fn catalog(fail_on: Option<&'static str>) -> MockCatalogGateway {
    let mut catalog = MockCatalogGateway::new();
    catalog.expect_search().times(1).returning(|_| Ok(listing()));
    catalog.expect_coin_detail().returning(move |id: &str| {
      if Some(id) == fail_on {
        return Err(seed_core::Error::Http("boom".to_string()));
      }
      let symbol = match id {
        "tether" => "usdt",
        "chainlink" => "link",
        other => other,
      };
      Ok(detail(id, symbol, Some("ethereum")))
    });
    catalog
  }

  fn explorer(rate_limited: Option<&'static str>) -> MockExplorerGateway {
    let mut explorer = MockExplorerGateway::new();
    explorer.expect_latest_token_transfer().returning(move |address: &str| {
      if rate_limited.is_some_and(|id| address == format!("0x{}", id)) {
        Ok(TokenLookup::RateLimited)
      } else {
        Ok(TokenLookup::Found(ExplorerTokenInfo { token_decimal: 18 }))
      }
    });
    explorer
  }

  fn pipeline(
    config: SeedConfig,
    catalog: MockCatalogGateway,
    explorer: MockExplorerGateway,
    writer: MockSeedWriter,
  ) -> SeedPipeline {
    SeedPipeline::new(config, Arc::new(catalog), Arc::new(explorer), Arc::new(writer))
  }

  #[tokio::test]
  async fn test_unsupported_currency_makes_no_calls() {
    let mut config = config();
    config.base_currency = "abcd".to_string();

    let mut catalog = MockCatalogGateway::new();
    catalog.expect_search().times(0);
    catalog.expect_coin_detail().times(0);
    let mut writer = MockSeedWriter::new();
    writer.expect_write().times(0);

    let err = pipeline(config, catalog, MockExplorerGateway::new(), writer)
      .run(&PathBuf::from("unused.toml"), false)
      .await
      .unwrap_err();
    assert!(matches!(err, SeedError::Config(seed_core::Error::UnsupportedBaseCurrency(_))));
  }

  #[tokio::test]
  async fn test_search_failure_writes_empty_seed() {
    let mut catalog = MockCatalogGateway::new();
    catalog
      .expect_search()
      .times(1)
      .returning(|_| Err(seed_core::Error::Http("connection refused".to_string())));
    catalog.expect_coin_detail().times(0);
    let mut writer = MockSeedWriter::new();
    writer
      .expect_write()
      .withf(|_: &Path, entries: &[SeedEntry]| entries.is_empty())
      .times(1)
      .returning(|_, _| Ok(()));

    let (entries, report) = pipeline(config(), catalog, MockExplorerGateway::new(), writer)
      .run(&PathBuf::from("out.toml"), false)
      .await
      .unwrap();
    assert!(entries.is_empty());
    assert_eq!(report.listed, 0);
    assert_eq!(report.emitted, 0);
    assert!(report.search_error.as_deref().is_some_and(|e| e.contains("connection refused")));
  }

  #[tokio::test]
  async fn test_search_failure_dry_run_writes_nothing() {
    let mut catalog = MockCatalogGateway::new();
    catalog
      .expect_search()
      .returning(|_| Err(seed_core::Error::RateLimit("429".to_string())));
    let mut writer = MockSeedWriter::new();
    writer.expect_write().times(0);

    let (entries, report) = pipeline(config(), catalog, MockExplorerGateway::new(), writer)
      .run(&PathBuf::from("out.toml"), true)
      .await
      .unwrap();
    assert!(entries.is_empty());
    assert!(report.search_error.is_some());
  }

  #[tokio::test]
  async fn test_positions_follow_emission_order() {
    let mut writer = MockSeedWriter::new();
    writer
      .expect_write()
      .withf(|path: &Path, entries: &[SeedEntry]| {
        path == Path::new("out/currencies.toml") && entries.len() == 3
      })
      .times(1)
      .returning(|_, _| Ok(()));

    let (entries, report) = pipeline(config(), catalog(None), explorer(None), writer)
      .run(&PathBuf::from("out/currencies.toml"), false)
      .await
      .unwrap();

    let codes: Vec<&str> = entries.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec!["dai", "usdt", "link"]);
    let positions: Vec<Option<u32>> = entries.iter().map(|e| e.position()).collect();
    assert_eq!(positions, vec![Some(1), Some(2), Some(3)]);

    let first = entries[0].as_currency().unwrap();
    assert_eq!(first.withdraw_fee, dec!(1));
    assert_eq!(first.blockchain_key, "eth-mainnet");

    assert_eq!(report.listed, 4);
    assert_eq!(report.whitelisted, 1);
    assert_eq!(report.ranked, 2);
    assert_eq!(report.emitted, 3);
    assert!(report.needs_review.is_empty());
    assert_eq!(report.total_skipped(), 0);
  }

  #[tokio::test]
  async fn test_rate_limited_entry_takes_no_position() {
    let mut writer = MockSeedWriter::new();
    writer.expect_write().times(1).returning(|_, _| Ok(()));

    let (entries, report) = pipeline(config(), catalog(None), explorer(Some("tether")), writer)
      .run(&PathBuf::from("out.toml"), false)
      .await
      .unwrap();

    let positions: Vec<Option<u32>> = entries.iter().map(|e| e.position()).collect();
    assert_eq!(positions, vec![Some(1), None, Some(2)]);
    assert_eq!(entries[1].code(), "usdt");
    assert_eq!(report.rate_limited, vec!["usdt".to_string()]);
  }

  #[tokio::test]
  async fn test_detail_failure_drops_only_that_coin() {
    let mut writer = MockSeedWriter::new();
    writer.expect_write().times(1).returning(|_, _| Ok(()));

    let (entries, report) = pipeline(config(), catalog(Some("tether")), explorer(None), writer)
      .run(&PathBuf::from("out.toml"), false)
      .await
      .unwrap();

    let codes: Vec<&str> = entries.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec!["dai", "link"]);
    assert_eq!(entries[1].position(), Some(2));
    assert_eq!(report.skipped.get("detail_unavailable"), Some(&1));
  }

  #[tokio::test]
  async fn test_dry_run_skips_writer() {
    let mut writer = MockSeedWriter::new();
    writer.expect_write().times(0);

    let (entries, _) = pipeline(config(), catalog(None), explorer(None), writer)
      .run(&PathBuf::from("out.toml"), true)
      .await
      .unwrap();
    assert_eq!(entries.len(), 3);
  }
}
