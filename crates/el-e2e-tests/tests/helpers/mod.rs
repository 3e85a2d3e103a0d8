//! Shared test harness for E2E integration tests.
//!
//! Wires the module context, the mock hub channel, and the real
//! classify + dispatch path, so tests exercise the same code the event
//! loop runs without a broker.

use std::sync::Arc;

use rumqttc::{Publish, QoS};

use el_camera_module::config::ModuleConfig;
use el_camera_module::context::{ModuleContext, SharedContext};
use el_camera_module::events;
use el_hub_channel::{MockChannel, TwinClient, classify};
use el_protocol::messages::ModuleMessage;
use el_protocol::topics;
use el_protocol::twin::TwinDesiredPatch;

pub const DEVICE_ID: &str = "gateway-01";
pub const MODULE_ID: &str = "camera-capture";

/// E2E harness: default configuration, fresh context, mock channel.
pub struct TestHarness {
    pub config: ModuleConfig,
    pub ctx: SharedContext,
    pub channel: MockChannel,
}

impl TestHarness {
    pub fn with_defaults() -> Self {
        let config = ModuleConfig::default();
        let ctx = Arc::new(ModuleContext::new(config.speech_map_filename.clone()));
        Self {
            config,
            ctx,
            channel: MockChannel::new(),
        }
    }

    /// Deliver a raw publish through classify + dispatch, as the event
    /// loop would.
    pub async fn deliver(&self, topic: &str, payload: &[u8]) -> anyhow::Result<()> {
        let mut publish = Publish::new(topic, QoS::AtLeastOnce, payload.to_vec());
        publish.pkid = 1;
        let msg = classify(&publish);
        let twin = TwinClient::new(&self.channel, DEVICE_ID, MODULE_ID);
        events::dispatch(msg, &self.ctx, &twin).await
    }

    /// Deliver a cloud-to-module message.
    pub async fn deliver_message(&self, message: &ModuleMessage) -> anyhow::Result<()> {
        let topic = topics::messages_input(DEVICE_ID, MODULE_ID);
        let payload = serde_json::to_vec(message).unwrap();
        self.deliver(&topic, &payload).await
    }

    /// Deliver a twin desired-property patch.
    pub async fn deliver_twin_patch(
        &self,
        body: serde_json::Value,
        version: u64,
    ) -> anyhow::Result<()> {
        let patch = TwinDesiredPatch {
            module_id: MODULE_ID.into(),
            patch: body,
            version,
            timestamp: chrono::Utc::now(),
        };
        let topic = topics::twin_desired(DEVICE_ID, MODULE_ID);
        let payload = serde_json::to_vec(&patch).unwrap();
        self.deliver(&topic, &payload).await
    }
}
