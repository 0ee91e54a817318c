//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LoaderConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoaderConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoaderConfig, ConfigError> {
    let config: LoaderConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.client.base_url, "http://localhost:8000");
        assert_eq!(config.server.bind_address, "127.0.0.1:8000");
        assert_eq!(config.hubspot.page_limit, 100);
        assert!(config.integrations.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let config = parse_config(
            r#"
            [client]
            base_url = "http://backend.internal:9000"

            [hubspot]
            client_id = "abc"
            scopes = ["crm.objects.contacts.read"]

            [[integrations]]
            label = "Slack"
            endpoint = "slack"
            action = "load"
            "#,
        )
        .unwrap();

        assert_eq!(config.client.base_url, "http://backend.internal:9000");
        assert_eq!(config.hubspot.client_id, "abc");
        assert_eq!(config.hubspot.scopes, vec!["crm.objects.contacts.read"]);
        assert_eq!(config.hubspot.state_ttl_secs, 600);
        assert_eq!(config.integrations.len(), 1);
        assert_eq!(config.integrations[0].path(), "integrations/slack/load");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[client\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config(
            r#"
            [client]
            base_url = "ftp://example.com"

            [server]
            request_timeout_secs = 0
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let err = parse_config("[hubspot]\nstate_ttl_secs = 9223372036854775807").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("hubspot.state_ttl_secs: must be at most"));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("integration-loader-missing-config.toml");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("integration-loader-test-config.toml");
        fs::write(&path, "[observability]\nlog_level = \"debug\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.observability.log_level, "debug");

        fs::remove_file(&path).unwrap_or_default();
    }
}
