use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Secure connection bundle descriptor returned by the management API.
///
/// The service sends camelCase keys (`downloadURL`); output uses the
/// descriptor's own field names (`DownloadURL`). Fields this client does not
/// model are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecureBundle {
    #[serde(rename = "DownloadURL", alias = "downloadURL")]
    pub download_url: String,

    #[serde(
        rename = "DownloadURLInternal",
        alias = "downloadURLInternal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url_internal: Option<String>,

    #[serde(
        rename = "DownloadURLMigrationProxy",
        alias = "downloadURLMigrationProxy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url_migration_proxy: Option<String>,

    #[serde(
        rename = "DownloadURLMigrationProxyInternal",
        alias = "downloadURLMigrationProxyInternal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url_migration_proxy_internal: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecureBundle {
    pub fn new(download_url: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into(),
            download_url_internal: None,
            download_url_migration_proxy: None,
            download_url_migration_proxy_internal: None,
            extra: Map::new(),
        }
    }
}
