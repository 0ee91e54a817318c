//! Integration catalogue.
//!
//! # Data Flow
//! ```text
//! integration label ("Notion", "HubSpot", ...)
//!     → registry.rs (label → endpoint + action)
//!     → path "integrations/{endpoint}/{action}"
//!     → client subsystem builds the request URL
//!
//! caller-supplied credentials
//!     → credentials.rs (opaque JSON object)
//!     → serialized verbatim into the `credentials` form field
//! ```
//!
//! # Design Decisions
//! - The table is static once built; config can add or override entries
//! - Unknown labels are rejected before any network traffic
//! - Credentials are never inspected on the loader side

pub mod credentials;
pub mod registry;

pub use credentials::Credentials;
pub use registry::{IntegrationDescriptor, IntegrationRegistry, UnknownIntegration};
