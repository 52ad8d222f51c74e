use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AstraError, Result};

pub const DEFAULT_API_URL: &str = "https://api.astra.datastax.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Credentials used by the login procedure.
///
/// `token` wins over `token_path` when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration: defaults, then a TOML file, then `ASTRA_*` env overrides.
    ///
    /// The file is the explicit path if given (`--config` / `ASTRA_CONFIG`),
    /// else `<config dir>/astra/config.toml`. A missing file is not an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let patch = match explicit_path {
            Some(path) => Self::load_patch(path)?,
            None => Self::load_global()?,
        };
        if let Some(patch) = patch {
            config.merge_patch(patch);
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(AstraError::Config(
                "api.timeout_secs must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| AstraError::Config("config directory not found".to_string()))?
            .join("astra/config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| AstraError::Config(format!("read config {}: {err}", path.display())))?;
        Self::parse_patch(&raw, path).map(Some)
    }

    fn parse_patch(raw: &str, path: &Path) -> Result<ConfigPatch> {
        toml::from_str(raw)
            .map_err(|err| AstraError::Config(format!("parse config {}: {err}", path.display())))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.api {
            self.api.merge(patch);
        }
        if let Some(patch) = patch.auth {
            self.auth.merge(patch);
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = non_empty(lookup("ASTRA_API_URL")) {
            self.api.url = value;
        }
        if let Some(value) = non_empty(lookup("ASTRA_TIMEOUT_SECS")) {
            self.api.timeout_secs = value.parse::<u64>().map_err(|err| {
                AstraError::Config(format!("invalid ASTRA_TIMEOUT_SECS value {value}: {err}"))
            })?;
        }
        if let Some(value) = non_empty(lookup("ASTRA_TOKEN")) {
            self.auth.token = Some(value);
        }
        if let Some(value) = non_empty(lookup("ASTRA_TOKEN_PATH")) {
            self.auth.token_path = Some(PathBuf::from(value));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub api: Option<ApiPatch>,
    pub auth: Option<AuthPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiPatch {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AuthPatch {
    pub token: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl ApiConfig {
    fn merge(&mut self, patch: ApiPatch) {
        if let Some(value) = patch.url {
            self.url = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

impl AuthConfig {
    fn merge(&mut self, patch: AuthPatch) {
        if let Some(value) = patch.token {
            self.token = Some(value);
        }
        if let Some(value) = patch.token_path {
            self.token_path = Some(value);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
