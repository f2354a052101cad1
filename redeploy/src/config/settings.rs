//! Portainer connection settings

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::env::EnvSource;
use crate::errors::RedeployError;

pub const PORTAINER_HOST: &str = "PORTAINER_HOST";
pub const PORTAINER_PORT: &str = "PORTAINER_PORT";
pub const PORTAINER_TOKEN: &str = "PORTAINER_TOKEN";
pub const STRATUM_BRANCH: &str = "STRATUM_BRANCH";

/// Connection parameters for the Portainer API plus the git branch to deploy
pub struct PortainerSettings {
    /// Portainer host name or address
    pub host: String,

    /// Portainer port, kept verbatim so the URL carries exactly what CI set
    pub port: String,

    /// API key sent as `X-API-Key`
    pub token: SecretString,

    /// Branch the stack is redeployed from
    pub branch: String,
}

impl PortainerSettings {
    /// Read the connection settings from `env`
    pub fn from_env<E: EnvSource>(env: &E) -> Result<Self, RedeployError> {
        Ok(Self {
            host: env.require(PORTAINER_HOST)?,
            port: env.require(PORTAINER_PORT)?,
            token: SecretString::from(env.require(PORTAINER_TOKEN)?),
            branch: env.require(STRATUM_BRANCH)?,
        })
    }

    /// `http://<host>:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Git reference Portainer pulls the stack from
    pub fn reference_name(&self) -> String {
        format!("refs/heads/{}", self.branch)
    }

    pub(crate) fn api_key(&self) -> &str {
        self.token.expose_secret()
    }
}

impl fmt::Debug for PortainerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortainerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &"[REDACTED]")
            .field("branch", &self.branch)
            .finish()
    }
}
