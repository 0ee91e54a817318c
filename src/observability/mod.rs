//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (load, item, and OAuth callback counters)
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → Prometheus scrape endpoint (server only, optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured log level
//! - Counters are recorded even when no exporter is installed (no-op recorder)

pub mod logging;
pub mod metrics;
