//! Configuration profiles
//!
//! A profile is the set of values one redeploy needs: which stack on which
//! endpoint, and the environment overrides forwarded to it.

pub mod chain;
pub mod schema;

use tracing::debug;

use crate::config::env::EnvSource;
use crate::errors::RedeployError;
use crate::models::redeploy::EnvOverride;
use crate::profile::chain::Chain;
use crate::profile::schema::Variant;

/// Resolved configuration profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Variant the profile was resolved for
    pub variant: Variant,

    /// Selected chain, chain-aware variant only
    pub chain: Option<Chain>,

    /// Portainer stack identifier
    pub stack_id: String,

    /// Portainer endpoint identifier
    pub endpoint_id: String,

    /// Overrides in payload order
    pub overrides: Vec<EnvOverride>,
}

impl Profile {
    /// Resolve the profile for `variant` from `env`.
    ///
    /// For the chain-aware variant the `NODE_CHAIN` selector is checked first;
    /// an unknown value fails with [`RedeployError::InvalidChain`] before
    /// anything else is read.
    pub fn resolve<E: EnvSource>(variant: Variant, env: &E) -> Result<Self, RedeployError> {
        let chain = if variant.is_chain_aware() {
            Some(Chain::from_env(env)?)
        } else {
            None
        };

        let schema = variant.schema();
        let stack_id = schema.stack_id.require(env, chain)?;
        let endpoint_id = schema.endpoint_id.require(env, chain)?;

        let overrides = schema
            .overrides
            .iter()
            .map(|field| {
                let value = field.source.value(env, chain)?;
                if value.is_none() {
                    debug!("{} is unset, forwarding null", field.source.key_name(chain));
                }
                Ok::<_, RedeployError>(EnvOverride::new(field.name, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            variant,
            chain,
            stack_id,
            endpoint_id,
            overrides,
        })
    }

    /// Value forwarded under `name`, if the override exists and is set
    pub fn override_value(&self, name: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_deref())
    }
}
