//! HTTP client for the Portainer API

use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::config::settings::PortainerSettings;
use crate::errors::RedeployError;

/// Header carrying the Portainer access token
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Raw answer from Portainer
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client for Portainer
pub struct PortainerClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl PortainerClient {
    /// Create a new client. Without `timeout` requests wait indefinitely.
    pub fn new(
        settings: &PortainerSettings,
        timeout: Option<Duration>,
    ) -> Result<Self, RedeployError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: settings.base_url().trim_end_matches('/').to_string(),
            token: SecretString::from(settings.api_key().to_string()),
        })
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a PUT request with a JSON body, returning status and body text
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, RedeployError> {
        let url = self.url(path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(API_KEY_HEADER, self.token.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("PUT {} answered {}", url, status);

        Ok(ApiResponse { status, body })
    }
}
