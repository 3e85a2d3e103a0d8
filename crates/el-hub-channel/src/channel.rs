//! Hub channel — async client for the edge-to-cloud connection.
//!
//! Wraps `rumqttc::AsyncClient` with the subscriptions and typed publish
//! helpers the camera module needs, configured entirely from the ambient
//! edge environment.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use serde::Serialize;

use crate::config::EdgeEnv;
use crate::error::{EdgeError, EdgeResult};
use crate::tls;
use el_protocol::topics;

// ── Channel trait ─────────────────────────────────────────────

/// Abstraction for the module's hub connection.
///
/// Enables mocking in tests without a real MQTT broker. `shutdown` is
/// part of the seam so registration-failure cleanup is testable.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Publish a raw payload to a topic.
    async fn publish(&self, topic: &str, payload: &[u8], qos: QoS) -> EdgeResult<()>;

    /// Subscribe to a topic filter.
    async fn subscribe(&self, filter: &str, qos: QoS) -> EdgeResult<()>;

    /// Release the connection. Safe to call at most once per run path;
    /// a second call must be a no-op.
    async fn shutdown(&self) -> EdgeResult<()>;
}

// ── HubChannel ────────────────────────────────────────────────

/// MQTT channel connected to the hub gateway.
///
/// Owns the `AsyncClient` for publishing/subscribing. The `EventLoop`
/// is returned separately from `connect()` — the caller must drive it
/// via `eventloop.poll()`.
pub struct HubChannel {
    client: AsyncClient,
    device_id: String,
    module_id: String,
    closed: AtomicBool,
}

impl HubChannel {
    /// Open the connection described by the ambient edge environment.
    ///
    /// Returns `(channel, event_loop)`. The connection itself is lazy;
    /// rumqttc dials on the first `eventloop.poll()`.
    pub fn connect(env: &EdgeEnv) -> EdgeResult<(Self, EventLoop)> {
        let mut options = MqttOptions::new(env.client_id(), &env.gateway_host, env.broker_port);
        options.set_keep_alive(std::time::Duration::from_secs(env.keepalive_secs.into()));
        options.set_transport(tls::transport_from_env(env)?);

        let (client, eventloop) = AsyncClient::new(options, 64);

        Ok((
            Self {
                client,
                device_id: env.device_id.clone(),
                module_id: env.module_id.clone(),
                closed: AtomicBool::new(false),
            },
            eventloop,
        ))
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Serialize and publish at QoS 1.
    pub async fn publish_json<T: Serialize>(&self, topic: &str, payload: &T) -> EdgeResult<()> {
        let bytes =
            serde_json::to_vec(payload).map_err(|e| EdgeError::Serialization(e.to_string()))?;
        self.publish(topic, &bytes, QoS::AtLeastOnce).await
    }
}

#[async_trait]
impl Channel for HubChannel {
    async fn publish(&self, topic: &str, payload: &[u8], qos: QoS) -> EdgeResult<()> {
        self.client
            .publish(topic, qos, false, payload)
            .await
            .map_err(|e| EdgeError::Publish(e.to_string()))
    }

    async fn subscribe(&self, filter: &str, qos: QoS) -> EdgeResult<()> {
        self.client
            .subscribe(filter, qos)
            .await
            .map_err(|e| EdgeError::Subscribe(e.to_string()))
    }

    async fn shutdown(&self) -> EdgeResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            // Already released on an earlier run path.
            return Ok(());
        }
        self.client
            .disconnect()
            .await
            .map_err(|e| EdgeError::Shutdown(e.to_string()))
    }
}

// ── Subscription registration ─────────────────────────────────

/// Register the module's two inbound subscriptions: cloud-to-module
/// messages and twin desired-property patches.
///
/// If either subscription fails, the channel is shut down before the
/// triggering error is propagated — a partially-registered module never
/// keeps its connection.
pub async fn register_subscriptions<C: Channel>(
    channel: &C,
    device_id: &str,
    module_id: &str,
) -> EdgeResult<()> {
    let inbound = topics::messages_input(device_id, module_id);
    let desired = topics::twin_desired(device_id, module_id);

    for filter in [&inbound, &desired] {
        if let Err(e) = channel.subscribe(filter, QoS::AtLeastOnce).await {
            tracing::error!(filter = %filter, error = %e, "subscription failed, releasing channel");
            if let Err(shutdown_err) = channel.shutdown().await {
                tracing::warn!(error = %shutdown_err, "shutdown after failed registration also failed");
            }
            return Err(e);
        }
    }
    Ok(())
}
