//! Declarative description of each deploy variant
//!
//! A variant lists where the target identifiers come from and which
//! environment variables are forwarded to the stack, in payload order.

use std::fmt;
use std::str::FromStr;

use crate::config::env::EnvSource;
use crate::errors::RedeployError;
use crate::profile::chain::{Chain, NODE_CHAIN};

/// Overrides every stratum stack receives
const SHARED_OVERRIDES: [&str; 6] = [
    "CLICKHOUSE_URL",
    "CLICKHOUSE_USER",
    "CLICKHOUSE_PASSWORD",
    "NEXUS_URL",
    "REDROCK_API_URL",
    "REDROCK_API_KEY",
];

/// Overrides read from `<CHAIN>_<NAME>` and forwarded as `<NAME>`
const CHAIN_OVERRIDES: [&str; 9] = [
    "NODE_PORT",
    "NODE_KEY",
    "COINBASE_OUTPUT_SCRIPT_TYPE",
    "COINBASE_OUTPUT_SCRIPT_VALUE",
    "POOL_SIGNATURE",
    "POOL_PORT",
    "TRANSLATOR_PORT",
    "POOL_METRICS_PORT",
    "TRANSLATOR_METRICS_PORT",
];

const BASIC_OVERRIDES: [&str; 3] = ["CLICKHOUSE_URL", "CLICKHOUSE_USER", "CLICKHOUSE_PASSWORD"];

/// Deploy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Stratum stack with fixed identifiers
    #[default]
    Stratum,

    /// Stratum stack per node chain, selected by `NODE_CHAIN`
    Chain,

    /// Minimal stack with the ClickHouse credentials only
    Basic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Stratum => "stratum",
            Variant::Chain => "chain",
            Variant::Basic => "basic",
        }
    }

    /// Whether the variant needs a `NODE_CHAIN` selector
    pub fn is_chain_aware(&self) -> bool {
        matches!(self, Variant::Chain)
    }

    /// Schema describing this variant
    pub fn schema(&self) -> Schema {
        match self {
            Variant::Stratum => Schema {
                stack_id: KeySource::Plain("STRATUM_STACK_ID"),
                endpoint_id: KeySource::Plain("STRATUM_ENDPOINT_ID"),
                overrides: SHARED_OVERRIDES
                    .into_iter()
                    .map(OverrideField::plain)
                    .collect(),
            },
            Variant::Chain => Schema {
                stack_id: KeySource::ChainPrefixed("STACK_ID"),
                endpoint_id: KeySource::ChainPrefixed("ENDPOINT_ID"),
                overrides: SHARED_OVERRIDES
                    .into_iter()
                    .map(OverrideField::plain)
                    .chain(CHAIN_OVERRIDES.into_iter().map(OverrideField::chain_prefixed))
                    .chain(std::iter::once(OverrideField {
                        name: NODE_CHAIN,
                        source: KeySource::Selector,
                    }))
                    .collect(),
            },
            Variant::Basic => Schema {
                stack_id: KeySource::Plain("STACK_ID"),
                endpoint_id: KeySource::Plain("ENDPOINT_ID"),
                overrides: BASIC_OVERRIDES
                    .into_iter()
                    .map(OverrideField::plain)
                    .collect(),
            },
        }
    }
}

impl FromStr for Variant {
    type Err = RedeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stratum" => Ok(Variant::Stratum),
            "chain" => Ok(Variant::Chain),
            "basic" => Ok(Variant::Basic),
            _ => Err(RedeployError::ConfigError(format!("Unknown variant: {}", s))),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Environment variable with a fixed name
    Plain(&'static str),

    /// Environment variable named `<CHAIN>_<name>`
    ChainPrefixed(&'static str),

    /// The selected chain itself
    Selector,
}

impl KeySource {
    /// Resolve the value, `None` when the variable is unset
    pub fn value<E: EnvSource>(
        &self,
        env: &E,
        chain: Option<Chain>,
    ) -> Result<Option<String>, RedeployError> {
        match self {
            KeySource::Plain(key) => Ok(env.var(key)),
            KeySource::ChainPrefixed(name) => Ok(env.var(&require_chain(chain)?.env_key(name))),
            KeySource::Selector => Ok(Some(require_chain(chain)?.as_str().to_string())),
        }
    }

    /// Resolve the value, failing when the variable is unset
    pub fn require<E: EnvSource>(
        &self,
        env: &E,
        chain: Option<Chain>,
    ) -> Result<String, RedeployError> {
        self.value(env, chain)?
            .ok_or_else(|| RedeployError::MissingVariable(self.key_name(chain)))
    }

    /// Environment variable name this source reads
    pub fn key_name(&self, chain: Option<Chain>) -> String {
        match (self, chain) {
            (KeySource::Plain(key), _) => key.to_string(),
            (KeySource::ChainPrefixed(name), Some(chain)) => chain.env_key(name),
            (KeySource::ChainPrefixed(name), None) => format!("<CHAIN>_{}", name),
            (KeySource::Selector, _) => NODE_CHAIN.to_string(),
        }
    }
}

fn require_chain(chain: Option<Chain>) -> Result<Chain, RedeployError> {
    chain.ok_or_else(|| {
        RedeployError::ConfigError("chain-prefixed key resolved without a chain".to_string())
    })
}

/// One forwarded environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideField {
    /// Name the stack sees
    pub name: &'static str,

    /// Where the value is read from
    pub source: KeySource,
}

impl OverrideField {
    fn plain(name: &'static str) -> Self {
        Self {
            name,
            source: KeySource::Plain(name),
        }
    }

    fn chain_prefixed(name: &'static str) -> Self {
        Self {
            name,
            source: KeySource::ChainPrefixed(name),
        }
    }
}

/// Resolved layout of a variant
#[derive(Debug, Clone)]
pub struct Schema {
    pub stack_id: KeySource,
    pub endpoint_id: KeySource,
    pub overrides: Vec<OverrideField>,
}
