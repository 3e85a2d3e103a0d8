//! Mock hub channel for testing without a real broker.
//!
//! Records publishes, subscription filters, and shutdown calls, and can
//! be armed to fail selected subscriptions to exercise the registration
//! cleanup path.

use async_trait::async_trait;
use rumqttc::QoS;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::channel::Channel;
use crate::error::{EdgeError, EdgeResult};

/// A recorded publish call.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub qos: QoS,
}

/// Mock implementation of the `Channel` trait.
///
/// Stores all calls in memory for test verification. Thread-safe via
/// `Mutex` (fine for test contexts).
pub struct MockChannel {
    published: Mutex<Vec<PublishedMessage>>,
    subscriptions: Mutex<Vec<(String, QoS)>>,
    failing_filters: Mutex<Vec<String>>,
    shutdowns: AtomicUsize,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
            failing_filters: Mutex::new(Vec::new()),
            shutdowns: AtomicUsize::new(0),
        }
    }

    /// Arm the mock to fail any subscribe whose filter contains `fragment`.
    pub fn fail_subscribes_matching(&self, fragment: &str) {
        self.failing_filters.lock().unwrap().push(fragment.into());
    }

    /// Get all published messages.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }

    /// Get published messages for a specific topic.
    pub fn published_to(&self, topic: &str) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }

    /// Get all subscription filters.
    pub fn subscriptions(&self) -> Vec<(String, QoS)> {
        self.subscriptions.lock().unwrap().clone()
    }

    /// Check whether a subscription was made to the given filter.
    pub fn is_subscribed_to(&self, filter: &str) -> bool {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .any(|(f, _)| f == filter)
    }

    /// Number of times `shutdown` was invoked.
    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    /// Clear all recorded state and failure injections.
    pub fn reset(&self) {
        self.published.lock().unwrap().clear();
        self.subscriptions.lock().unwrap().clear();
        self.failing_filters.lock().unwrap().clear();
        self.shutdowns.store(0, Ordering::SeqCst);
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn publish(&self, topic: &str, payload: &[u8], qos: QoS) -> EdgeResult<()> {
        self.published.lock().unwrap().push(PublishedMessage {
            topic: topic.to_string(),
            payload: payload.to_vec(),
            qos,
        });
        Ok(())
    }

    async fn subscribe(&self, filter: &str, qos: QoS) -> EdgeResult<()> {
        let failing = self.failing_filters.lock().unwrap();
        if failing.iter().any(|fragment| filter.contains(fragment)) {
            return Err(EdgeError::Subscribe(format!(
                "injected failure for '{filter}'"
            )));
        }
        drop(failing);

        self.subscriptions
            .lock()
            .unwrap()
            .push((filter.to_string(), qos));
        Ok(())
    }

    async fn shutdown(&self) -> EdgeResult<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
