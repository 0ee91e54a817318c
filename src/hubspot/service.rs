//! HubSpot integration flow: authorize, callback, credential pickup, items.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::HubSpotConfig;
use crate::hubspot::api::HubSpotClient;
use crate::hubspot::item::IntegrationItem;
use crate::hubspot::oauth::{authorization_url, OAuthState};
use crate::hubspot::store::{credentials_key, state_key, TtlStore};
use crate::hubspot::HubSpotError;
use crate::observability::metrics;

const INTEGRATION: &str = "hubspot";

/// Query parameters of the OAuth redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Server-side state and logic for the HubSpot integration.
#[derive(Debug, Clone)]
pub struct HubSpotIntegration {
    client: HubSpotClient,
    store: TtlStore,
    config: HubSpotConfig,
}

impl HubSpotIntegration {
    pub fn new(config: HubSpotConfig) -> Self {
        Self {
            client: HubSpotClient::new(config.clone()),
            store: TtlStore::new(),
            config,
        }
    }

    pub fn store(&self) -> &TtlStore {
        &self.store
    }

    /// Start the OAuth flow for a user and return the authorization URL.
    pub fn authorize(&self, user_id: &str, org_id: &str) -> Result<String, HubSpotError> {
        let state = OAuthState::new(user_id, org_id);
        let url = authorization_url(&self.config, &state)?;

        self.store.set(
            state_key(org_id, user_id),
            state.to_json(),
            Duration::from_secs(self.config.state_ttl_secs),
        );
        tracing::info!(user_id, org_id, "HubSpot authorization started");

        Ok(url.into())
    }

    /// Complete the OAuth flow and park the token response for pickup.
    pub async fn oauth2_callback(&self, params: &CallbackParams) -> Result<(), HubSpotError> {
        let result = self.complete_callback(params).await;
        metrics::record_oauth_callback(INTEGRATION, if result.is_ok() { "success" } else { "error" });
        result
    }

    async fn complete_callback(&self, params: &CallbackParams) -> Result<(), HubSpotError> {
        if let Some(error) = &params.error {
            let detail = params.error_description.clone().unwrap_or_else(|| error.clone());
            return Err(HubSpotError::BadRequest(detail));
        }

        let code = params
            .code
            .as_deref()
            .ok_or_else(|| HubSpotError::BadRequest("Missing authorization code.".into()))?;
        let encoded = params
            .state
            .as_deref()
            .ok_or_else(|| HubSpotError::BadRequest("Missing state.".into()))?;
        let state = OAuthState::decode(encoded)?;

        let key = state_key(&state.org_id, &state.user_id);
        let saved = self
            .store
            .get(&key)
            .and_then(|raw| serde_json::from_str::<OAuthState>(&raw).ok());
        if saved.map(|s| s.state) != Some(state.state.clone()) {
            tracing::warn!(user_id = %state.user_id, org_id = %state.org_id, "OAuth state mismatch");
            return Err(HubSpotError::BadRequest("State does not match.".into()));
        }

        let (token, ()) = tokio::join!(self.client.exchange_code(code), async {
            self.store.delete(&key)
        });
        let token = token?;

        self.store.set(
            credentials_key(&state.org_id, &state.user_id),
            token.to_string(),
            Duration::from_secs(self.config.credentials_ttl_secs),
        );
        tracing::info!(user_id = %state.user_id, org_id = %state.org_id, "HubSpot credentials stored");

        Ok(())
    }

    /// Hand stored credentials to the caller exactly once.
    pub fn credentials(&self, user_id: &str, org_id: &str) -> Result<Value, HubSpotError> {
        let raw = self
            .store
            .take(&credentials_key(org_id, user_id))
            .ok_or_else(|| HubSpotError::BadRequest("No credentials found.".into()))?;
        Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
    }

    /// List CRM contacts as integration items.
    ///
    /// `credentials` is the JSON text the loader sent in its form field.
    pub async fn items(&self, credentials: &str) -> Result<Vec<IntegrationItem>, HubSpotError> {
        let credentials: Value = serde_json::from_str(credentials)
            .map_err(|_| HubSpotError::BadRequest("Invalid credentials payload.".into()))?;
        let access_token = credentials
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                HubSpotError::BadRequest("No access token found in credentials.".into())
            })?;

        let items: Vec<IntegrationItem> = self
            .client
            .list_contacts(access_token)
            .await
            .iter()
            .map(|contact| IntegrationItem::from_contact(contact, "Contact", None, None))
            .collect();

        metrics::record_items(INTEGRATION, items.len());
        tracing::info!(count = items.len(), "HubSpot items loaded");

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration() -> HubSpotIntegration {
        HubSpotIntegration::new(HubSpotConfig::default())
    }

    #[test]
    fn test_authorize_stores_state() {
        let hubspot = integration();
        let url = hubspot.authorize("u1", "o1").unwrap();

        assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?"));
        let saved = hubspot.store().get("hubspot_state:o1:u1").unwrap();
        let saved: OAuthState = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved.user_id, "u1");
        assert_eq!(saved.org_id, "o1");
        assert!(url.contains(&saved.encode().replace('=', "%3D")));
    }

    #[test]
    fn test_authorize_survives_unvalidated_ttl() {
        let config = HubSpotConfig {
            state_ttl_secs: i64::MAX as u64,
            ..HubSpotConfig::default()
        };
        let hubspot = HubSpotIntegration::new(config);

        hubspot.authorize("u", "o").unwrap();
        assert!(hubspot.store().get("hubspot_state:o:u").is_some());
    }

    #[tokio::test]
    async fn test_callback_error_param() {
        let hubspot = integration();
        let params = CallbackParams {
            error: Some("access_denied".into()),
            error_description: Some("User declined".into()),
            ..Default::default()
        };

        let err = hubspot.oauth2_callback(&params).await.unwrap_err();
        assert_eq!(err.to_string(), "User declined");
    }

    #[tokio::test]
    async fn test_callback_state_mismatch() {
        let hubspot = integration();
        hubspot.authorize("u1", "o1").unwrap();

        let forged = OAuthState::new("u1", "o1");
        let params = CallbackParams {
            code: Some("code".into()),
            state: Some(forged.encode()),
            ..Default::default()
        };

        let err = hubspot.oauth2_callback(&params).await.unwrap_err();
        assert_eq!(err.to_string(), "State does not match.");
        // Pending state survives a forged callback
        assert!(hubspot.store().get("hubspot_state:o1:u1").is_some());
    }

    #[test]
    fn test_credentials_one_shot() {
        let hubspot = integration();
        hubspot.store().set(
            credentials_key("o1", "u1"),
            r#"{"access_token":"tok"}"#,
            Duration::from_secs(60),
        );

        let creds = hubspot.credentials("u1", "o1").unwrap();
        assert_eq!(creds["access_token"], "tok");

        let err = hubspot.credentials("u1", "o1").unwrap_err();
        assert_eq!(err.to_string(), "No credentials found.");
    }

    #[tokio::test]
    async fn test_items_requires_access_token() {
        let hubspot = integration();

        let err = hubspot.items(r#"{"refresh_token":"r"}"#).await.unwrap_err();
        assert_eq!(err.to_string(), "No access token found in credentials.");

        let err = hubspot.items("not json").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials payload.");
    }
}
