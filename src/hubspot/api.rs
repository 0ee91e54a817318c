//! HubSpot REST calls.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::HubSpotConfig;
use crate::hubspot::HubSpotError;

/// Thin wrapper over the token endpoint and the CRM contacts API.
#[derive(Debug, Clone)]
pub struct HubSpotClient {
    http: Client,
    config: HubSpotConfig,
}

impl HubSpotClient {
    pub fn new(config: HubSpotConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Exchange an authorization code for the token response.
    pub async fn exchange_code(&self, code: &str) -> Result<Value, HubSpotError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code", code),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let parsed: Option<Value> = serde_json::from_slice(&body).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(status = %status, message = %message, "HubSpot token exchange rejected");
            return Err(HubSpotError::TokenExchange(message));
        }

        parsed.ok_or_else(|| HubSpotError::TokenExchange("token response is not JSON".into()))
    }

    /// Fetch every contact visible to `access_token`, following paging cursors.
    ///
    /// Failures never propagate: a failed first page yields an empty list and
    /// a failed later page ends pagination with what was collected so far.
    pub async fn list_contacts(&self, access_token: &str) -> Vec<Value> {
        let url = format!(
            "{}/crm/v3/objects/contacts",
            self.config.api_base_url.trim_end_matches('/')
        );
        let limit = self.config.page_limit.to_string();

        let mut contacts = Vec::new();
        let mut after: Option<String> = None;
        let mut page = 0u32;

        loop {
            page += 1;
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(access_token)
                .query(&[("limit", limit.as_str())]);
            if let Some(cursor) = &after {
                request = request.query(&[("after", cursor.as_str())]);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, page, "Exception while fetching HubSpot contacts");
                    break;
                }
            };

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = %status, body = %body, page, "Error fetching HubSpot contacts");
                break;
            }

            let data: Value = match response.json().await {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!(error = %e, page, "Invalid HubSpot contacts page");
                    break;
                }
            };

            if let Some(results) = data.get("results").and_then(Value::as_array) {
                contacts.extend(results.iter().cloned());
            }

            after = data.pointer("/paging/next/after").and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
            if after.is_none() {
                break;
            }
        }

        tracing::debug!(count = contacts.len(), pages = page, "HubSpot contacts fetched");
        contacts
    }
}
