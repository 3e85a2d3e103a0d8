use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cloud-to-module message routed through the hub.
///
/// Carries an opaque binary payload plus a string-keyed property map,
/// mirroring the hub's message envelope. The module treats the payload
/// as UTF-8 text at dispatch time; the wire type itself makes no
/// encoding assumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMessage {
    /// Hub-assigned message id.
    pub id: Uuid,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
    /// Application properties attached by the sender.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// When the hub enqueued the message.
    pub enqueued_at: DateTime<Utc>,
}

impl ModuleMessage {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: Uuid::now_v7(),
            payload: payload.into(),
            properties: BTreeMap::new(),
            enqueued_at: Utc::now(),
        }
    }

    /// Attach an application property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
