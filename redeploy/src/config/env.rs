//! Environment lookup

use std::collections::HashMap;

use crate::errors::RedeployError;

/// Source of environment variables.
///
/// Production code reads the process environment through [`ProcessEnv`];
/// tests hand in a plain `HashMap` instead of mutating the real environment.
pub trait EnvSource {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, failing when it is unset
    fn require(&self, key: &str) -> Result<String, RedeployError> {
        self.var(key)
            .ok_or_else(|| RedeployError::MissingVariable(key.to_string()))
    }
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
