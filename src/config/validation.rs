//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, socket addresses, and value ranges
//! - Reject malformed or duplicate integration entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoaderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::LoaderConfig;
use crate::hubspot::store::MAX_TTL;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "server.bind_address").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LoaderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url(&mut errors, "client.base_url", &config.client.base_url);

    check_socket_addr(&mut errors, "server.bind_address", &config.server.bind_address);
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }
    if config.server.max_body_size == 0 {
        errors.push(ValidationError::new("server.max_body_size", "must be greater than 0"));
    }

    let hubspot = &config.hubspot;
    check_http_url(&mut errors, "hubspot.redirect_uri", &hubspot.redirect_uri);
    check_http_url(&mut errors, "hubspot.authorize_url", &hubspot.authorize_url);
    check_http_url(&mut errors, "hubspot.token_url", &hubspot.token_url);
    check_http_url(&mut errors, "hubspot.api_base_url", &hubspot.api_base_url);
    if hubspot.scopes.is_empty() {
        errors.push(ValidationError::new("hubspot.scopes", "at least one scope is required"));
    }
    if !(1..=100).contains(&hubspot.page_limit) {
        errors.push(ValidationError::new("hubspot.page_limit", "must be between 1 and 100"));
    }
    check_ttl(&mut errors, "hubspot.state_ttl_secs", hubspot.state_ttl_secs);
    check_ttl(&mut errors, "hubspot.credentials_ttl_secs", hubspot.credentials_ttl_secs);
    if hubspot.sweep_interval_secs == 0 {
        errors.push(ValidationError::new("hubspot.sweep_interval_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let mut labels = HashSet::new();
    for (i, integration) in config.integrations.iter().enumerate() {
        let prefix = format!("integrations[{}]", i);
        if integration.label.trim().is_empty() {
            errors.push(ValidationError::new(format!("{prefix}.label"), "must not be empty"));
        } else if !labels.insert(integration.label.as_str()) {
            errors.push(ValidationError::new(
                format!("{prefix}.label"),
                format!("duplicate label '{}'", integration.label),
            ));
        }
        for (name, segment) in [("endpoint", &integration.endpoint), ("action", &integration.action)] {
            if segment.trim().is_empty() {
                errors.push(ValidationError::new(format!("{prefix}.{name}"), "must not be empty"));
            } else if !is_plain_segment(segment) {
                errors.push(ValidationError::new(
                    format!("{prefix}.{name}"),
                    format!("'{segment}' is not a plain path segment (use letters, digits, '-', '_', '.', '~')"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ttl(errors: &mut Vec<ValidationError>, field: &str, secs: u64) {
    if secs == 0 {
        errors.push(ValidationError::new(field, "must be greater than 0"));
    } else if secs > MAX_TTL.as_secs() {
        errors.push(ValidationError::new(
            field,
            format!("must be at most {} seconds", MAX_TTL.as_secs()),
        ));
    }
}

/// Unreserved characters only, and not a dot segment, so URL joins stay put.
fn is_plain_segment(segment: &str) -> bool {
    segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {e}"))),
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(field, format!("invalid socket address '{value}'")));
    }
}
