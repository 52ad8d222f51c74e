//! Blocking HTTP client construction.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{AstraError, Result};

const USER_AGENT_VALUE: &str = concat!("astra/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by API calls and bundle downloads.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(AstraError::Http)
}
