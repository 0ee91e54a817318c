//! Integration backend HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID for tracing)
//!     → form.rs (multipart or urlencoded fields)
//!     → handlers.rs (HubSpot integration calls)
//!     → error.rs ({"detail": ...} on failure)
//!     → Send to client
//! ```

pub mod error;
pub mod form;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, IntegrationServer};
