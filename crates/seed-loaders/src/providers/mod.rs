/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! HTTP implementations of the catalog and explorer gateways.

pub mod coingecko;
pub mod etherscan;
pub mod transport;

pub use coingecko::CoinGeckoProvider;
pub use etherscan::EtherscanProvider;
pub use transport::Transport;
