//! Redeploy pipeline: environment in, one PUT out, exit code back

use std::io::Write;

use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::config::env::EnvSource;
use crate::config::settings::PortainerSettings;
use crate::errors::{RedeployError, EXIT_FAILURE, EXIT_OK};
use crate::http::client::{PortainerClient, API_KEY_HEADER};
use crate::http::stacks::redeploy_path;
use crate::models::redeploy::RedeployRequest;
use crate::profile::Profile;

/// Everything needed to issue the redeploy call
#[derive(Debug)]
pub struct RedeployPlan {
    pub settings: PortainerSettings,
    pub profile: Profile,
    pub request: RedeployRequest,
}

impl RedeployPlan {
    /// Resolve the profile and connection settings from `env`.
    ///
    /// The profile is resolved first so that a bad chain selector is
    /// reported even when the connection variables are missing too.
    pub fn resolve<E: EnvSource>(options: &AppOptions, env: &E) -> Result<Self, RedeployError> {
        let profile = Profile::resolve(options.variant, env)?;
        let settings = PortainerSettings::from_env(env)?;
        let request = RedeployRequest::new(profile.overrides.clone(), settings.reference_name());

        Ok(Self {
            settings,
            profile,
            request,
        })
    }

    /// Full URL of the redeploy call
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url(),
            redeploy_path(&self.profile.stack_id, &self.profile.endpoint_id)
        )
    }

    /// Human readable rendering of the call with the token redacted
    pub fn describe(&self) -> Result<String, RedeployError> {
        Ok(format!(
            "PUT {}\nContent-Type: application/json\n{}: [REDACTED]\n\n{}",
            self.url(),
            API_KEY_HEADER,
            serde_json::to_string_pretty(&self.request)?
        ))
    }
}

/// Run one redeploy. With `dry_run` set the plan is written to `out`
/// instead of being sent.
pub async fn run<E, W>(options: &AppOptions, env: &E, out: &mut W) -> Result<(), RedeployError>
where
    E: EnvSource,
    W: Write,
{
    let plan = RedeployPlan::resolve(options, env)?;
    info!(
        "Redeploying {} stack {} (chain: {:?})",
        plan.profile.variant, plan.profile.stack_id, plan.profile.chain
    );

    if options.dry_run {
        writeln!(out, "{}", plan.describe()?)?;
        return Ok(());
    }

    let client = PortainerClient::new(&plan.settings, options.timeout)?;
    client
        .redeploy_stack(&plan.profile.stack_id, &plan.profile.endpoint_id, &plan.request)
        .await
}

/// Translate the outcome of [`run`] into a process exit code. The chain
/// diagnostic and the rejection body go to `out`; every other failure is
/// written to `err_out` regardless of the log filter.
pub fn report<W, E>(result: &Result<(), RedeployError>, out: &mut W, err_out: &mut E) -> i32
where
    W: Write,
    E: Write,
{
    let err = match result {
        Ok(()) => return EXIT_OK,
        Err(err) => err,
    };

    let written = match err {
        RedeployError::InvalidChain(_) => writeln!(out, "{}", err),
        RedeployError::Rejected { body, .. } => writeln!(out, "{}", body),
        _ => {
            error!("Redeploy failed: {}", err);
            writeln!(err_out, "Redeploy failed: {}", err)
        }
    };
    if written.is_err() {
        return EXIT_FAILURE;
    }

    err.exit_code()
}
