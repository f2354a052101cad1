//! Application configuration options

use std::collections::HashMap;
use std::time::Duration;

use crate::config::env::EnvSource;
use crate::errors::RedeployError;
use crate::logs::{LogLevel, LogOptions};
use crate::profile::schema::Variant;

pub const REDEPLOY_VARIANT: &str = "REDEPLOY_VARIANT";
pub const REDEPLOY_LOG_LEVEL: &str = "REDEPLOY_LOG_LEVEL";
pub const REDEPLOY_TIMEOUT_SECS: &str = "REDEPLOY_TIMEOUT_SECS";

/// Flags accepted on the command line
const KNOWN_FLAGS: [&str; 6] = ["variant", "dry-run", "version", "timeout", "log-level", "log-json"];

/// Main application options
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Which deploy variant to run
    pub variant: Variant,

    /// Print the request instead of sending it
    pub dry_run: bool,

    /// Print version info and exit
    pub show_version: bool,

    /// Request timeout; `None` waits for as long as Portainer takes
    pub timeout: Option<Duration>,

    /// Logging options
    pub log: LogOptions,
}

impl AppOptions {
    /// Build options from command line arguments (without the program name)
    /// and the environment. Flags win over environment variables.
    pub fn from_args<I, E>(args: I, env: &E) -> Result<Self, RedeployError>
    where
        I: IntoIterator<Item = String>,
        E: EnvSource,
    {
        let cli_args = parse_cli_args(args)?;
        let lookup = |flag: &str, key: &str| cli_args.get(flag).cloned().or_else(|| env.var(key));

        let variant = match lookup("variant", REDEPLOY_VARIANT) {
            Some(v) => v.parse()?,
            None => Variant::default(),
        };

        let log_level = match lookup("log-level", REDEPLOY_LOG_LEVEL) {
            Some(v) => v.parse()?,
            None => LogLevel::default(),
        };

        let timeout = match lookup("timeout", REDEPLOY_TIMEOUT_SECS) {
            Some(v) => {
                let secs: u64 = v.parse().map_err(|_| {
                    RedeployError::ConfigError(format!("Invalid timeout: {}", v))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            variant,
            dry_run: cli_args.contains_key("dry-run"),
            show_version: cli_args.contains_key("version"),
            timeout,
            log: LogOptions {
                log_level,
                json_format: cli_args.contains_key("log-json"),
            },
        })
    }
}

/// Collect `--key=value` pairs and bare `--flag`s.
///
/// Anything outside [`KNOWN_FLAGS`] is rejected, so a mistyped `--dry-run`
/// never turns into a live redeploy.
fn parse_cli_args<I: IntoIterator<Item = String>>(
    args: I,
) -> Result<HashMap<String, String>, RedeployError> {
    let mut cli_args = HashMap::new();

    for arg in args {
        let (key, value) = match arg.split_once('=') {
            Some((key, value)) if key.starts_with("--") => (key, value),
            None if arg.starts_with("--") => (arg.as_str(), "true"),
            _ => {
                return Err(RedeployError::ConfigError(format!(
                    "Unexpected argument: {}",
                    arg
                )))
            }
        };

        let clean_key = key.trim_start_matches('-');
        if !KNOWN_FLAGS.contains(&clean_key) {
            return Err(RedeployError::ConfigError(format!("Unknown flag: {}", key)));
        }
        cli_args.insert(clean_key.to_string(), value.to_string());
    }

    Ok(cli_args)
}
