//! Management API integration.
//!
//! Data types returned by the control plane and the client that fetches them.

pub mod client;
pub mod types;

pub use client::{DatabaseService, OpsClient};
pub use types::SecureBundle;
