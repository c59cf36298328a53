/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Error types for seed loading.

use thiserror::Error;

/// Errors that abort a seed run or a write.
#[derive(Error, Debug)]
pub enum SeedError {
  #[error("Configuration error: {0}")]
  Config(#[from] seed_core::Error),

  #[error("Failed to create HTTP client: {0}")]
  ClientBuild(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Seed serialization failed: {0}")]
  Serialize(#[from] toml::ser::Error),

  #[error("Seed parse failed: {0}")]
  Deserialize(#[from] toml::de::Error),
}

/// Result type for seed loader operations.
pub type SeedResult<T> = Result<T, SeedError>;

/// Why a single coin was left out of the seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
  /// Catalog detail could not be fetched
  DetailUnavailable(String),

  /// Ranked coin on a platform outside the allowed set
  UnsupportedPlatform(Option<String>),

  /// Price missing, non-positive, or too small to divide by
  InvalidPrice(String),
}

impl SkipReason {
  /// Short label used for run summaries
  pub fn label(&self) -> &'static str {
    match self {
      SkipReason::DetailUnavailable(_) => "detail_unavailable",
      SkipReason::UnsupportedPlatform(_) => "unsupported_platform",
      SkipReason::InvalidPrice(_) => "invalid_price",
    }
  }
}

impl std::fmt::Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SkipReason::DetailUnavailable(e) => write!(f, "detail unavailable: {}", e),
      SkipReason::UnsupportedPlatform(Some(p)) => write!(f, "unsupported asset platform {}", p),
      SkipReason::UnsupportedPlatform(None) => write!(f, "no asset platform"),
      SkipReason::InvalidPrice(e) => write!(f, "invalid price: {}", e),
    }
  }
}
