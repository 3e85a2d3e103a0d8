//! Lifecycle-scoped shared state for the running module.
//!
//! Replaces process globals with one context object: the twin dispatcher
//! writes the speech-map filename, the scan loop reads it, and two
//! diagnostic counters track event deliveries. The only cross-task
//! guarantee is that the next scan observes the latest twin value.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

/// Shared mutable state, created at startup and discarded at exit.
pub struct ModuleContext {
    speech_map_filename: RwLock<String>,
    received_messages: AtomicU64,
    twin_callbacks: AtomicU64,
}

/// Context handle shared between the scan loop and the event dispatcher.
pub type SharedContext = Arc<ModuleContext>;

impl ModuleContext {
    pub fn new(initial_speech_map: impl Into<String>) -> Self {
        Self {
            speech_map_filename: RwLock::new(initial_speech_map.into()),
            received_messages: AtomicU64::new(0),
            twin_callbacks: AtomicU64::new(0),
        }
    }

    /// Current speech-map filename (latest twin value, or the startup
    /// configuration if no patch arrived yet).
    pub async fn speech_map_filename(&self) -> String {
        self.speech_map_filename.read().await.clone()
    }

    /// Overwrite the speech-map filename from a twin patch.
    pub async fn set_speech_map_filename(&self, filename: impl Into<String>) {
        *self.speech_map_filename.write().await = filename.into();
    }

    /// Count one delivered cloud-to-module message; returns the running
    /// total.
    pub fn record_message(&self) -> u64 {
        self.received_messages.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count one delivered twin patch; returns the running total.
    pub fn record_twin_callback(&self) -> u64 {
        self.twin_callbacks.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn received_messages(&self) -> u64 {
        self.received_messages.load(Ordering::Relaxed)
    }

    pub fn twin_callbacks(&self) -> u64 {
        self.twin_callbacks.load(Ordering::Relaxed)
    }
}
