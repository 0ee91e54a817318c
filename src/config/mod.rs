//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoaderConfig (validated, immutable)
//!     → CLI builds IntegrationClient; server builds AppState
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an absent or empty file is usable
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ClientConfig, HubSpotConfig, LoaderConfig, ObservabilityConfig, ServerConfig};
pub use validation::{validate_config, ValidationError};
