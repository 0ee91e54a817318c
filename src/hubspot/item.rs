//! Normalized integration items.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider object reduced to the fields every integration shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub parent_id: Option<String>,
    pub parent_path_or_name: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

impl IntegrationItem {
    /// Build an item from a CRM contact object.
    pub fn from_contact(
        contact: &Value,
        item_type: &str,
        parent_id: Option<String>,
        parent_name: Option<String>,
    ) -> Self {
        let id = contact.get("id").and_then(id_string);
        let property = |key: &str| {
            contact
                .get("properties")
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .unwrap_or_default()
        };
        let name = format!("{} {}", property("firstname"), property("lastname"));

        Self {
            url: id
                .as_ref()
                .map(|id| format!("https://app.hubspot.com/contacts/{}", id)),
            id,
            name: Some(name),
            item_type: item_type.to_string(),
            parent_id,
            parent_path_or_name: parent_name,
            creation_time: contact.get("createdAt").and_then(parse_time),
            last_modified_time: contact.get("updatedAt").and_then(parse_time),
        }
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a timestamp given as epoch milliseconds (number or numeric string)
/// or as RFC 3339 text. Anything else yields `None`.
pub fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(from_millis),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(millis) => from_millis(millis),
            Err(_) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        },
        _ => None,
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
