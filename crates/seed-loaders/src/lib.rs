/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! # seed-loaders
//!
//! Builds the currency seed from the CoinGecko catalog and the Etherscan
//! explorer:
//!
//! 1. search the catalog and select whitelisted and top-ranked coins
//! 2. fetch per-coin detail, resolve ERC-20 decimals on Etherscan
//! 3. assemble seed entries (fees, precision, base factor)
//! 4. write them as TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seed_loaders::{CoinGeckoProvider, EtherscanProvider, SeedPipeline, TomlSeedWriter};
//! use std::sync::Arc;
//!
//! let config = seed_core::SeedConfig::load("config/seed.toml")?;
//! let catalog = CoinGeckoProvider::new(&config.coingecko, &config.http)?;
//! let explorer = EtherscanProvider::new(&config.etherscan, &config.http)?;
//! let output = config.output_path();
//!
//! let pipeline = SeedPipeline::new(config, Arc::new(catalog), Arc::new(explorer), Arc::new(TomlSeedWriter));
//! let (entries, report) = pipeline.run(&output, false).await?;
//! ```

pub mod assembler;
pub mod enrichment;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod selection;
pub mod traits;
pub mod types;
pub mod writer;

pub use assembler::{assemble, convert_tariffs, precision};
pub use enrichment::Enricher;
pub use error::{SeedError, SeedResult, SkipReason};
pub use pipeline::SeedPipeline;
pub use selection::select;
pub use traits::{CatalogGateway, ExplorerGateway, SeedWriter};
pub use types::{
  AssemblyContext, ConvertedTariffs, EnrichedCoin, EnrichmentRules, RunReport, Selection,
  SelectionPath,
};
pub use writer::{read_seed_file, TomlSeedWriter};

// Re-export providers
pub use providers::{CoinGeckoProvider, EtherscanProvider};
