//! Common types used across seed-* crates

pub mod coin;
pub mod network;
pub mod record;
pub mod tariffs;

pub use coin::{CoinDetail, CoinSummary, ExplorerTokenInfo, TokenLookup};
pub use network::ExplorerNetwork;
pub use record::{BaseFactor, CurrencyOptions, CurrencyRecord, RateLimitedEntry, SeedEntry, SeedFile};
pub use tariffs::Tariffs;
