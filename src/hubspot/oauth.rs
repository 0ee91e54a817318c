//! OAuth state handling and authorization URLs.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::HubSpotConfig;
use crate::hubspot::HubSpotError;

/// Random bytes behind each state token.
const STATE_TOKEN_BYTES: usize = 32;

/// State round-tripped through the provider's authorization page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl OAuthState {
    /// Fresh state with a random URL-safe token.
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            state: new_state_token(),
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// JSON text as stored server-side.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// URL-safe base64 of the JSON form, passed as the `state` query param.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.to_json())
    }

    pub fn decode(encoded: &str) -> Result<Self, HubSpotError> {
        let bytes = URL_SAFE
            .decode(encoded)
            .or_else(|_| URL_SAFE_NO_PAD.decode(encoded))
            .map_err(|_| HubSpotError::BadRequest("Invalid state encoding.".into()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| HubSpotError::BadRequest("Invalid state payload.".into()))
    }
}

pub fn new_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Authorization page URL for `state`.
pub fn authorization_url(config: &HubSpotConfig, state: &OAuthState) -> Result<Url, HubSpotError> {
    let mut url = Url::parse(&config.authorize_url)
        .map_err(|e| HubSpotError::Config(format!("authorize_url: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", &config.scopes.join(" "))
        .append_pair("state", &state.encode());
    Ok(url)
}
