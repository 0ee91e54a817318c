//! Integration data loader and HubSpot integration backend.

pub mod client;
pub mod config;
pub mod http;
pub mod hubspot;
pub mod integrations;
pub mod lifecycle;
pub mod loader;
pub mod observability;

pub use client::{IntegrationClient, LoadError};
pub use config::LoaderConfig;
pub use http::IntegrationServer;
pub use integrations::{Credentials, IntegrationRegistry};
pub use lifecycle::Shutdown;
pub use loader::{DataLoader, Notifier};
