use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstraError {
    #[error("unable to login with error {0}")]
    Login(#[source] Box<AstraError>),

    #[error("unable to get '{id}' with error {source}")]
    BundleLookup {
        id: String,
        #[source]
        source: Box<AstraError>,
    },

    #[error("unable to download zip with error {0}")]
    Download(#[source] reqwest::Error),

    #[error("unable to create file to save to {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to copy downloaded file to {}: {source}", path.display())]
    CopyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected error marshaling to json: '{0}', Try --output zip instead")]
    Serialize(#[source] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AstraError>;
