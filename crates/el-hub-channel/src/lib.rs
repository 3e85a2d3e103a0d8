//! MQTT connectivity client for the edgelens camera module.
//!
//! Provides the edge side of the hub connection:
//! - `Channel` trait for publish/subscribe/shutdown (mockable in tests)
//! - `HubChannel` over `rumqttc`, configured from the ambient edge environment
//! - `MockChannel` for testing without a broker
//! - `TwinClient` for reported-state updates
//! - `IncomingMessage` classification for dispatching inbound events

pub mod channel;
pub mod config;
pub mod error;
pub mod handler;
pub mod mock;
pub mod tls;
pub mod twin;

// Re-exports for convenience.
pub use channel::{Channel, HubChannel, register_subscriptions};
pub use config::EdgeEnv;
pub use error::{EdgeError, EdgeResult};
pub use handler::{IncomingMessage, classify};
pub use mock::MockChannel;
pub use twin::TwinClient;
