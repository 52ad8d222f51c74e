use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{AstraError, Result};
use crate::ops::OpsClient;
use crate::utils::http::build_client;

/// Per-invocation context built from the CLI flags and configuration.
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self { config })
    }

    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.timeout_secs)
    }

    /// Plain HTTP client for pre-signed downloads.
    pub fn http_client(&self) -> Result<Client> {
        build_client(self.timeout())
    }

    /// Resolve the configured token and build an authenticated API client.
    ///
    /// No request is sent; a bad token surfaces on the first API call.
    pub fn login(&self) -> Result<OpsClient> {
        let token = self.resolve_token()?;
        debug!(api = %self.config.api.url, "logging in");
        OpsClient::new(&self.config.api.url, token, self.timeout())
    }

    fn resolve_token(&self) -> Result<String> {
        let auth = &self.config.auth;
        if let Some(token) = auth.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        if let Some(path) = auth.token_path.as_ref() {
            let raw = std::fs::read_to_string(path).map_err(|err| {
                AstraError::Auth(format!("read token file {}: {err}", path.display()))
            })?;
            let token = raw.trim();
            if token.is_empty() {
                return Err(AstraError::Auth(format!(
                    "token file {} is empty",
                    path.display()
                )));
            }
            return Ok(token.to_string());
        }

        Err(AstraError::Auth(
            "no token configured; set ASTRA_TOKEN or auth.token in the config file".to_string(),
        ))
    }
}
