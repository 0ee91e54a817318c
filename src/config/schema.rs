//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure shared by the
//! loader CLI and the integration server. All types derive Serde traits for
//! deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;
use crate::integrations::IntegrationDescriptor;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Loader-side settings (where the integration backend lives).
    pub client: ClientConfig,

    /// Integration server settings.
    pub server: ServerConfig,

    /// HubSpot OAuth application and API settings.
    pub hubspot: HubSpotConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Extra integrations, or overrides of built-in labels.
    pub integrations: Vec<IntegrationDescriptor>,
}

/// Loader-side configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the integration backend.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Integration server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,

    /// Total time allowed per request in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// HubSpot OAuth app and API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HubSpotConfig {
    /// OAuth client ID.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// Redirect URI registered with the OAuth app.
    pub redirect_uri: String,

    /// Authorization page users are sent to.
    pub authorize_url: String,

    /// Token exchange endpoint.
    pub token_url: String,

    /// CRM API base URL.
    pub api_base_url: String,

    /// Requested OAuth scopes.
    pub scopes: Vec<String>,

    /// Contacts requested per page.
    pub page_limit: u32,

    /// Lifetime of a pending OAuth state in seconds.
    pub state_ttl_secs: u64,

    /// Lifetime of stored credentials awaiting pickup in seconds.
    pub credentials_ttl_secs: u64,

    /// How often expired state and credentials are purged, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            // WARNING: placeholders, set real app credentials in the config file.
            client_id: "your_client_id_here".to_string(),
            client_secret: "your_client_secret_here".to_string(),
            redirect_uri: "http://localhost:8000/integrations/hubspot/oauth2callback".to_string(),
            authorize_url: "https://app.hubspot.com/oauth/authorize".to_string(),
            token_url: "https://api.hubapi.com/oauth/v1/token".to_string(),
            api_base_url: "https://api.hubapi.com".to_string(),
            scopes: vec!["crm.objects.contacts.read".to_string(), "oauth".to_string()],
            page_limit: 100,
            state_ttl_secs: 600,
            credentials_ttl_secs: 600,
            sweep_interval_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (e.g., "info" or "integration_loader=debug").
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable output.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint (server only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
