//! Twin reported-state operations over the hub channel.
//!
//! The module acknowledges applied desired-property patches by merging
//! the values back into the twin's reported state.

use rumqttc::QoS;

use crate::channel::Channel;
use crate::error::{EdgeError, EdgeResult};
use el_protocol::{topics, twin::TwinReportedUpdate};

/// Twin operations backed by a `Channel` implementation.
///
/// Wraps any `Channel` (real or mock) to provide twin-specific publish
/// and subscribe methods.
pub struct TwinClient<'a, C: Channel> {
    channel: &'a C,
    device_id: String,
    module_id: String,
}

impl<'a, C: Channel> TwinClient<'a, C> {
    pub fn new(channel: &'a C, device_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            channel,
            device_id: device_id.into(),
            module_id: module_id.into(),
        }
    }

    /// Publish a reported-state update acknowledging `version`.
    pub async fn report_state(&self, reported: serde_json::Value, version: u64) -> EdgeResult<()> {
        let update = TwinReportedUpdate {
            module_id: self.module_id.clone(),
            reported,
            version,
        };
        let topic = topics::twin_reported(&self.device_id, &self.module_id);
        let bytes =
            serde_json::to_vec(&update).map_err(|e| EdgeError::Serialization(e.to_string()))?;
        self.channel.publish(&topic, &bytes, QoS::AtLeastOnce).await
    }

    /// Subscribe to desired-property patches for this module.
    pub async fn subscribe_desired(&self) -> EdgeResult<()> {
        let topic = topics::twin_desired(&self.device_id, &self.module_id);
        self.channel.subscribe(&topic, QoS::AtLeastOnce).await
    }
}
