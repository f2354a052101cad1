//! Stack API

use reqwest::StatusCode;
use tracing::info;

use crate::errors::RedeployError;
use crate::http::client::PortainerClient;
use crate::models::redeploy::RedeployRequest;

/// Path of the git redeploy endpoint for a stack
pub fn redeploy_path(stack_id: &str, endpoint_id: &str) -> String {
    format!(
        "/api/stacks/{}/git/redeploy?endpointId={}",
        stack_id, endpoint_id
    )
}

impl PortainerClient {
    /// Redeploy a git-backed stack.
    ///
    /// Only `200 OK` counts as success; any other status comes back as
    /// [`RedeployError::Rejected`] carrying the response body.
    pub async fn redeploy_stack(
        &self,
        stack_id: &str,
        endpoint_id: &str,
        request: &RedeployRequest,
    ) -> Result<(), RedeployError> {
        let path = redeploy_path(stack_id, endpoint_id);
        let response = self.put(&path, request).await?;

        if response.status != StatusCode::OK {
            return Err(RedeployError::Rejected {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        info!("Stack {} redeployed on endpoint {}", stack_id, endpoint_id);
        Ok(())
    }
}
