//! Integration backend client.
//!
//! # Responsibilities
//! - Resolve an integration label to its backend URL
//! - Send credentials as a single multipart `credentials` field
//! - Turn non-success responses into errors carrying the backend's `detail`
//!
//! # Design Decisions
//! - One request per load: no retries, no timeouts, no cancellation
//! - The base URL always ends with '/' so relative joins keep its path

pub mod error;
pub mod integration_client;

pub use error::{extract_detail, LoadError};
pub use integration_client::{IntegrationClient, CREDENTIALS_FIELD, DEFAULT_BASE_URL};
