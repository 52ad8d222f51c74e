//! Management API client.
//!
//! Wraps the control-plane HTTP API with bearer-token authentication.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::{AstraError, Result};
use crate::ops::types::SecureBundle;
use crate::utils::http::build_client;

/// Database operations the CLI needs from the management service.
pub trait DatabaseService {
    /// Fetch the secure connection bundle descriptor for a database.
    fn get_secure_bundle(&self, database_id: &str) -> Result<SecureBundle>;
}

/// Authenticated client for the management API.
pub struct OpsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for OpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpsClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl OpsClient {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_http(build_client(timeout)?, base_url, token))
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_http(http: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn secure_bundle_url(&self, database_id: &str) -> String {
        format!(
            "{}/v2/databases/{}/secureBundleURL",
            self.base_url,
            urlencoding::encode(database_id)
        )
    }
}

impl DatabaseService for OpsClient {
    fn get_secure_bundle(&self, database_id: &str) -> Result<SecureBundle> {
        let url = self.secure_bundle_url(database_id);
        debug!(url = %url, "requesting secure bundle");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default().trim().to_string();
            return Err(AstraError::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    message
                },
            });
        }

        let body = response.bytes()?;
        serde_json::from_slice(&body).map_err(|err| AstraError::Api {
            status: status.as_u16(),
            message: format!("invalid secure bundle response: {err}"),
        })
    }
}
