//! Incoming message classification for the hub event loop.
//!
//! Parses raw MQTT publishes into typed `IncomingMessage` variants so
//! the module can dispatch them without topic string matching.

use rumqttc::Publish;

use el_protocol::messages::ModuleMessage;
use el_protocol::topics;
use el_protocol::twin::TwinDesiredPatch;

/// A classified incoming MQTT publish.
#[derive(Debug)]
pub enum IncomingMessage {
    /// Cloud-to-module message routed through the hub.
    Inbound(ModuleMessage),
    /// Twin desired-property patch pushed from the cloud.
    TwinPatch(TwinDesiredPatch),
    /// Unrecognized topic or undecodable envelope.
    Unknown { topic: String, payload: Vec<u8> },
}

/// Classify a raw MQTT publish into a typed message.
///
/// Uses `el_protocol::topics::parse_topic` to extract category/action,
/// then attempts JSON deserialization into the appropriate envelope.
pub fn classify(publish: &Publish) -> IncomingMessage {
    let topic = &publish.topic;
    let payload = &publish.payload;

    let Some(parsed) = topics::parse_topic(topic) else {
        return IncomingMessage::Unknown {
            topic: topic.clone(),
            payload: payload.to_vec(),
        };
    };

    match (parsed.category.as_str(), parsed.action.as_str()) {
        ("messages", "input") => match serde_json::from_slice::<ModuleMessage>(payload) {
            Ok(message) => IncomingMessage::Inbound(message),
            Err(_) => IncomingMessage::Unknown {
                topic: topic.clone(),
                payload: payload.to_vec(),
            },
        },
        ("twin", "desired") => match serde_json::from_slice::<TwinDesiredPatch>(payload) {
            Ok(patch) => IncomingMessage::TwinPatch(patch),
            Err(_) => IncomingMessage::Unknown {
                topic: topic.clone(),
                payload: payload.to_vec(),
            },
        },
        _ => IncomingMessage::Unknown {
            topic: topic.clone(),
            payload: payload.to_vec(),
        },
    }
}
