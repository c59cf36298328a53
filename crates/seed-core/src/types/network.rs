use serde::{Deserialize, Serialize};

/// Etherscan networks and their API hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerNetwork {
  #[default]
  Mainnet,
  Sepolia,
  Holesky,
  Goerli,
  Rinkeby,
  Ropsten,
  Kovan,
}

impl ExplorerNetwork {
  pub fn base_url(&self) -> &'static str {
    match self {
      ExplorerNetwork::Mainnet => "https://api.etherscan.io",
      ExplorerNetwork::Sepolia => "https://api-sepolia.etherscan.io",
      ExplorerNetwork::Holesky => "https://api-holesky.etherscan.io",
      ExplorerNetwork::Goerli => "https://api-goerli.etherscan.io",
      ExplorerNetwork::Rinkeby => "https://api-rinkeby.etherscan.io",
      ExplorerNetwork::Ropsten => "https://api-ropsten.etherscan.io",
      ExplorerNetwork::Kovan => "https://api-kovan.etherscan.io",
    }
  }
}

impl std::fmt::Display for ExplorerNetwork {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ExplorerNetwork::Mainnet => write!(f, "mainnet"),
      ExplorerNetwork::Sepolia => write!(f, "sepolia"),
      ExplorerNetwork::Holesky => write!(f, "holesky"),
      ExplorerNetwork::Goerli => write!(f, "goerli"),
      ExplorerNetwork::Rinkeby => write!(f, "rinkeby"),
      ExplorerNetwork::Ropsten => write!(f, "ropsten"),
      ExplorerNetwork::Kovan => write!(f, "kovan"),
    }
  }
}
