use thiserror::Error;

/// The main error type for seed-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Base currency not carried by the catalog
  #[error("Unsupported base currency: {0}")]
  UnsupportedBaseCurrency(String),

  /// TOML parsing error
  #[error("TOML parse error: {0}")]
  Toml(#[from] toml::de::Error),

  /// Missing required field in response
  #[error("Missing required field: {0}")]
  MissingField(String),

  /// API rate limit exceeded
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// API error reported in the response body
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// Whether this error means the remote side is throttling us.
  pub fn is_rate_limit(&self) -> bool {
    matches!(self, Error::RateLimit(_))
  }
}

/// Result type alias for seed-* crates
pub type Result<T> = std::result::Result<T, Error>;
