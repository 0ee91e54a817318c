//! The data loader form: load, clear, display.

use serde_json::Value;

use crate::client::IntegrationClient;
use crate::integrations::Credentials;
use crate::loader::notifier::Notifier;

/// Holds the most recently loaded data for one integration.
///
/// The loaded value only changes on a successful load or an explicit
/// [`clear`](DataLoader::clear).
pub struct DataLoader<N> {
    client: IntegrationClient,
    integration: String,
    credentials: Credentials,
    loaded: Option<Value>,
    notifier: N,
}

impl<N: Notifier> DataLoader<N> {
    pub fn new(
        client: IntegrationClient,
        integration: impl Into<String>,
        credentials: Credentials,
        notifier: N,
    ) -> Self {
        Self {
            client,
            integration: integration.into(),
            credentials,
            loaded: None,
            notifier,
        }
    }

    /// Fetch data for the current integration and credentials.
    ///
    /// Returns `true` when the display value was replaced. On failure the
    /// notifier is alerted and the previous value is kept.
    pub async fn load(&mut self) -> bool {
        match self.client.load(&self.integration, &self.credentials).await {
            Ok(value) => {
                tracing::debug!(integration = %self.integration, "Integration data loaded");
                self.loaded = Some(value);
                true
            }
            Err(e) => {
                tracing::debug!(integration = %self.integration, error = %e, "Integration load failed");
                let message = e.alert_message();
                self.notifier.alert(message.as_deref());
                false
            }
        }
    }

    /// Drop the loaded value. Never touches the network.
    pub fn clear(&mut self) {
        self.loaded = None;
    }

    pub fn loaded(&self) -> Option<&Value> {
        self.loaded.as_ref()
    }

    /// Pretty-printed JSON of the loaded value, or an empty string.
    pub fn display(&self) -> String {
        self.loaded
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
            .unwrap_or_default()
    }

    pub fn integration(&self) -> &str {
        &self.integration
    }

    /// Switch integrations. The loaded value is kept until the next load.
    pub fn set_integration(&mut self, integration: impl Into<String>) {
        self.integration = integration.into();
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }
}
