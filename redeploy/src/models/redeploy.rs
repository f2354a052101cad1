//! Portainer git redeploy payload

use serde::{Deserialize, Serialize};

/// Environment variable override applied to the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOverride {
    /// Variable name inside the stack
    pub name: String,

    /// Value; serialized as `null` when the source variable was unset
    pub value: Option<String>,
}

impl EnvOverride {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Body of `PUT /api/stacks/{id}/git/redeploy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeployRequest {
    /// Overrides, in declaration order
    pub env: Vec<EnvOverride>,

    /// Remove services no longer in the compose file
    pub prune: bool,

    /// Pull images before restarting
    pub pull_image: bool,

    /// Use stored credentials for the git repository
    pub repository_authentication: bool,

    /// `refs/heads/<branch>`
    pub repository_reference_name: String,
}

impl RedeployRequest {
    /// Request with the fixed flags used for every stratum redeploy
    pub fn new(env: Vec<EnvOverride>, repository_reference_name: String) -> Self {
        Self {
            env,
            prune: false,
            pull_image: true,
            repository_authentication: false,
            repository_reference_name,
        }
    }
}
