//! HubSpot CRM integration backend.
//!
//! # Data Flow
//! ```text
//! POST authorize (user_id, org_id)
//!     → oauth.rs (random state, base64 JSON)
//!     → store.rs hubspot_state:{org}:{user} (TTL)
//!     → authorization URL returned to the caller
//!
//! GET oauth2callback (code, state)
//!     → state compared with stored copy
//!     → api.rs token exchange ∥ state deletion
//!     → store.rs hubspot_credentials:{org}:{user} (TTL)
//!
//! POST credentials → one-shot pickup of the token response
//! POST get_hubspot_items (credentials)
//!     → api.rs paged contact listing
//!     → item.rs IntegrationItem per contact
//! ```
//!
//! # Design Decisions
//! - Pending state and credentials live in an in-process TTL store
//! - Listing is best-effort: upstream failures are logged, not returned

pub mod api;
pub mod item;
pub mod oauth;
pub mod service;
pub mod store;

use thiserror::Error;

pub use api::HubSpotClient;
pub use item::IntegrationItem;
pub use oauth::OAuthState;
pub use service::{CallbackParams, HubSpotIntegration};
pub use store::TtlStore;

/// Errors raised by the HubSpot integration.
#[derive(Debug, Error)]
pub enum HubSpotError {
    /// The caller's input was rejected. The message is shown verbatim.
    #[error("{0}")]
    BadRequest(String),

    /// HubSpot refused the authorization code.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Transport failure talking to HubSpot.
    #[error("HubSpot request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Misconfigured OAuth app settings.
    #[error("Configuration error: {0}")]
    Config(String),
}
