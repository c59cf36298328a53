use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config;

#[derive(Args, Debug)]
pub struct CheckArgs {
  /// Path to the seed configuration file
  #[arg(short, long)]
  config: Option<PathBuf>,
}

pub fn execute(args: CheckArgs) -> Result<()> {
  let path = config::config_path(args.config);
  let config = config::load(&path)?;

  info!("Configuration {} is valid", path.display());
  info!("Base currency: {}", config.base_currency);
  info!(
    "Selection: {} whitelisted ids, market cap rank <= {}, {} allowed platforms",
    config.filters.whitelist().len(),
    config.filters.market_cap_rank,
    config.filters.allowed_platforms().len()
  );
  info!("Output: {}", config.output_path().display());

  for platform in config.filters.allowed_platforms() {
    if !config.blockchain_mapping.contains_key(&platform) {
      warn!("Platform {} has no blockchain_mapping entry, records will need review", platform);
    }
  }

  if config.etherscan.api_key.is_none() {
    warn!("No Etherscan API key, ERC-20 lookups will be throttled");
  }

  Ok(())
}
