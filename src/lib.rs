//! astra - command-line client for a cloud database management service.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod ops;
pub mod utils;

pub use error::{AstraError, Result};
