//! MQTT topic builders and parser for the hub topic hierarchy.
//!
//! Topic structure:
//! ```text
//! hub/{device_id}/{module_id}/messages/input
//! hub/{device_id}/{module_id}/twin/desired
//! hub/{device_id}/{module_id}/twin/reported
//! ```

const PREFIX: &str = "hub";

// ─── Message topics ───

pub fn messages_input(device_id: &str, module_id: &str) -> String {
    format!("{PREFIX}/{device_id}/{module_id}/messages/input")
}

// ─── Twin topics ───

pub fn twin_desired(device_id: &str, module_id: &str) -> String {
    format!("{PREFIX}/{device_id}/{module_id}/twin/desired")
}

pub fn twin_reported(device_id: &str, module_id: &str) -> String {
    format!("{PREFIX}/{device_id}/{module_id}/twin/reported")
}

// ─── Subscription patterns (with MQTT wildcards) ───

/// Subscribe to everything addressed to one module.
pub fn module_subscribe_all(device_id: &str, module_id: &str) -> String {
    format!("{PREFIX}/{device_id}/{module_id}/#")
}

// ─── Topic parsing ───

/// Parsed MQTT topic components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic {
    pub device_id: String,
    pub module_id: String,
    pub category: String,
    pub action: String,
}

/// Parse a topic string into its components.
/// Returns `None` if the topic doesn't match the expected format.
pub fn parse_topic(topic: &str) -> Option<ParsedTopic> {
    let parts: Vec<&str> = topic.split('/').collect();

    if parts.first() != Some(&PREFIX) || parts.len() < 5 {
        return None;
    }

    Some(ParsedTopic {
        device_id: parts[1].to_string(),
        module_id: parts[2].to_string(),
        category: parts[3].to_string(),
        action: parts[4].to_string(),
    })
}
