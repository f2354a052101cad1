//! Node chain selector

use std::fmt;
use std::str::FromStr;

use crate::config::env::EnvSource;
use crate::errors::RedeployError;

/// Environment variable naming the chain to deploy
pub const NODE_CHAIN: &str = "NODE_CHAIN";

/// Blockchain network a chain-aware deployment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    /// Private test pool
    Pooltest,

    /// Public testnet
    Testnet,

    /// Mainnet
    Mainnet,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Pooltest, Chain::Testnet, Chain::Mainnet];

    /// Read and parse `NODE_CHAIN`; unset counts as an invalid selector
    pub fn from_env<E: EnvSource>(env: &E) -> Result<Self, RedeployError> {
        env.var(NODE_CHAIN).unwrap_or_default().parse()
    }

    /// Selector value as written in `NODE_CHAIN`
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Pooltest => "pooltest",
            Chain::Testnet => "testnet",
            Chain::Mainnet => "mainnet",
        }
    }

    /// Prefix of the chain-specific environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Chain::Pooltest => "POOLTEST",
            Chain::Testnet => "TESTNET",
            Chain::Mainnet => "MAINNET",
        }
    }

    /// `<PREFIX>_<name>`
    pub fn env_key(&self, name: &str) -> String {
        format!("{}_{}", self.env_prefix(), name)
    }
}

impl FromStr for Chain {
    type Err = RedeployError;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pooltest" => Ok(Chain::Pooltest),
            "testnet" => Ok(Chain::Testnet),
            "mainnet" => Ok(Chain::Mainnet),
            _ => Err(RedeployError::InvalidChain(s.to_string())),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
