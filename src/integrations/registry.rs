//! Label → backend path mapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single integration backend reachable through the loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IntegrationDescriptor {
    /// User-facing label (e.g., "Notion").
    pub label: String,

    /// First path segment after `integrations/` (e.g., "notion").
    pub endpoint: String,

    /// Action segment (e.g., "load").
    pub action: String,
}

impl IntegrationDescriptor {
    pub fn new(
        label: impl Into<String>,
        endpoint: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            endpoint: endpoint.into(),
            action: action.into(),
        }
    }

    /// Relative request path, without a leading slash.
    pub fn path(&self) -> String {
        format!("integrations/{}/{}", self.endpoint, self.action)
    }
}

/// Returned when a label is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown integration: {0}")]
pub struct UnknownIntegration(pub String);

/// Ordered, read-only table of integrations.
#[derive(Debug, Clone)]
pub struct IntegrationRegistry {
    entries: Vec<IntegrationDescriptor>,
}

impl IntegrationRegistry {
    /// The integrations shipped with the loader.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                IntegrationDescriptor::new("Notion", "notion", "load"),
                IntegrationDescriptor::new("Airtable", "airtable", "load"),
                IntegrationDescriptor::new("HubSpot", "hubspot", "get_hubspot_items"),
            ],
        }
    }

    /// Built-in table with `extra` applied on top.
    ///
    /// An entry whose label already exists replaces it in place; new labels
    /// are appended in the order given.
    pub fn with_overrides(extra: &[IntegrationDescriptor]) -> Self {
        let mut registry = Self::builtin();
        for descriptor in extra {
            match registry
                .entries
                .iter_mut()
                .find(|e| e.label == descriptor.label)
            {
                Some(existing) => *existing = descriptor.clone(),
                None => registry.entries.push(descriptor.clone()),
            }
        }
        registry
    }

    /// Resolve a label. Labels are case-sensitive.
    pub fn lookup(&self, label: &str) -> Result<&IntegrationDescriptor, UnknownIntegration> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .ok_or_else(|| UnknownIntegration(label.to_string()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntegrationDescriptor> {
        self.entries.iter()
    }
}

impl Default for IntegrationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_paths() {
        let registry = IntegrationRegistry::builtin();

        assert_eq!(registry.lookup("Notion").unwrap().path(), "integrations/notion/load");
        assert_eq!(registry.lookup("Airtable").unwrap().path(), "integrations/airtable/load");
        assert_eq!(
            registry.lookup("HubSpot").unwrap().path(),
            "integrations/hubspot/get_hubspot_items"
        );
    }

    #[test]
    fn test_unknown_label() {
        let registry = IntegrationRegistry::builtin();

        let err = registry.lookup("Salesforce").unwrap_err();
        assert_eq!(err, UnknownIntegration("Salesforce".into()));
        assert_eq!(err.to_string(), "Unknown integration: Salesforce");

        // Case sensitive
        assert!(registry.lookup("notion").is_err());
    }

    #[test]
    fn test_overrides() {
        let registry = IntegrationRegistry::with_overrides(&[
            IntegrationDescriptor::new("Notion", "notion", "load_v2"),
            IntegrationDescriptor::new("Slack", "slack", "load"),
        ]);

        let labels: Vec<&str> = registry.labels().collect();
        assert_eq!(labels, vec!["Notion", "Airtable", "HubSpot", "Slack"]);
        assert_eq!(registry.lookup("Notion").unwrap().path(), "integrations/notion/load_v2");
        assert_eq!(registry.lookup("Slack").unwrap().path(), "integrations/slack/load");
    }
}
