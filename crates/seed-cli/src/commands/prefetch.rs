use anyhow::{Context, Result};
use clap::Args;
use seed_loaders::{
  CatalogGateway, CoinGeckoProvider, EtherscanProvider, ExplorerGateway, SeedPipeline,
  TomlSeedWriter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config;

#[derive(Args, Debug)]
pub struct PrefetchArgs {
  /// Path to the seed configuration file
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Override the output file (defaults to output_dir/seed_filename)
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Dry run - fetch everything but don't write the seed file
  #[arg(long)]
  dry_run: bool,

  /// Hide the progress bar
  #[arg(long)]
  no_progress: bool,
}

pub async fn execute(args: PrefetchArgs) -> Result<()> {
  let path = config::config_path(args.config);
  let config = config::load(&path)?;
  let output = args.output.unwrap_or_else(|| config.output_path());

  let catalog = CoinGeckoProvider::new(&config.coingecko, &config.http)
    .context("Failed to create CoinGecko provider")?;
  let explorer = EtherscanProvider::new(&config.etherscan, &config.http)
    .context("Failed to create Etherscan provider")?;

  info!(
    "Starting seed prefetch: base currency {}, catalog {}, explorer {}",
    config.base_currency,
    catalog.source_name(),
    explorer.source_name()
  );

  if args.dry_run {
    info!("Dry run mode - the seed file will not be written");
  }

  let pipeline =
    SeedPipeline::new(config, Arc::new(catalog), Arc::new(explorer), Arc::new(TomlSeedWriter::new()))
      .with_progress(!args.no_progress);

  let (entries, report) = pipeline.run(&output, args.dry_run).await.context("Seed prefetch failed")?;

  info!(
    "Prefetch complete: {} entries ({} rate limited, {} need review, {} skipped)",
    entries.len(),
    report.rate_limited.len(),
    report.needs_review.len(),
    report.total_skipped()
  );

  if !args.dry_run {
    info!("Seed written to {}", output.display());
  }

  Ok(())
}
