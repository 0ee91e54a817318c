//! Data loader form.
//!
//! # Data Flow
//! ```text
//! user action "load"
//!     → data_loader.rs (IntegrationClient::load with current label + credentials)
//!     → success: replace loaded value, display pretty JSON
//!     → failure: notifier.rs alert(detail), loaded value untouched
//!
//! user action "clear"
//!     → loaded value dropped, display empty
//! ```
//!
//! # Design Decisions
//! - Single owner (`&mut self`); a later load simply overwrites an earlier one
//! - Failures never escape the loader; they end at the notifier

pub mod data_loader;
pub mod notifier;

pub use data_loader::DataLoader;
pub use notifier::{Notifier, StderrNotifier, TracingNotifier};
