//! HTTP transport to the integration backend.

use reqwest::multipart::Form;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::client::error::{extract_detail, LoadError};
use crate::integrations::{Credentials, IntegrationRegistry};
use crate::observability::metrics;

/// Default backend the loader talks to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Name of the single multipart field carrying the credentials.
pub const CREDENTIALS_FIELD: &str = "credentials";

/// Client for `POST /integrations/{endpoint}/{action}`.
#[derive(Debug, Clone)]
pub struct IntegrationClient {
    client: Client,
    base_url: Url,
    registry: IntegrationRegistry,
}

impl IntegrationClient {
    /// Create a client for the built-in integrations.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_registry(base_url, IntegrationRegistry::builtin())
    }

    pub fn with_registry(
        base_url: &str,
        registry: IntegrationRegistry,
    ) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            registry,
        })
    }

    pub fn registry(&self) -> &IntegrationRegistry {
        &self.registry
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a label, failing fast on unknown labels.
    pub fn endpoint_url(&self, label: &str) -> Result<Url, LoadError> {
        let descriptor = self.registry.lookup(label)?;
        Ok(self.base_url.join(&descriptor.path())?)
    }

    /// Send the credentials to the integration's load endpoint.
    ///
    /// Exactly one request is issued. A success body that is not JSON is
    /// returned as a JSON string.
    pub async fn load(&self, label: &str, credentials: &Credentials) -> Result<Value, LoadError> {
        let url = self.endpoint_url(label)?;
        let form = Form::new().text(CREDENTIALS_FIELD, credentials.to_json());

        tracing::debug!(integration = label, url = %url, "Loading integration data");

        let response = match self.client.post(url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_load(label, "transport_error");
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            metrics::record_load(label, "rejected");
            tracing::debug!(integration = label, status = %status, "Integration backend rejected load");
            return Err(LoadError::Status {
                status,
                detail: extract_detail(&body),
            });
        }

        metrics::record_load(label, "success");
        Ok(match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) => Value::String(String::from_utf8_lossy(&body).into_owned()),
        })
    }
}
