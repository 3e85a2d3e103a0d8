//! Camera capture session abstraction.
//!
//! The capture/inference/speech pipeline is an external collaborator;
//! the module only needs one operation from it — `scan` — plus scoped
//! acquire/release. `CaptureSession` is the seam; two impls:
//! - a future OpenCV-backed session on real hardware
//! - `MockCaptureSession` — all platforms, records scans (in this file)

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::config::ModuleConfig;

/// Errors surfaced by the capture pipeline.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("video source error: {0}")]
    Source(String),

    #[error("inference error: {0}")]
    Inference(String),

    #[error("speech synthesis error: {0}")]
    Speech(String),
}

/// Convenience alias for capture results.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// One acquired capture pipeline.
///
/// A session is a scoped resource: implementations release the video
/// source when dropped, so release runs on every exit path including
/// fault propagation. `scan` performs one unit of capture + inference +
/// speech work against the given speech map.
#[async_trait]
pub trait CaptureSession: Send + Sync {
    async fn scan(&self, speech_map_filename: &str) -> CaptureResult<()>;
}

// ── Mock session ────────────────────────────────────────────────

/// Scripted capture session for tests and broker-only deployments.
///
/// Records the speech-map filename passed to each scan and can be armed
/// to fail the next scan.
pub struct MockCaptureSession {
    video_source: String,
    scans: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl MockCaptureSession {
    /// Acquire a session for the configured video source.
    pub fn open(config: &ModuleConfig) -> CaptureResult<Self> {
        tracing::info!(
            video_source = %config.video_source,
            predict_threshold = config.predict_threshold,
            inference_endpoint = %config.inference_endpoint,
            "capture session opened"
        );
        Ok(Self {
            video_source: config.video_source.clone(),
            scans: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        })
    }

    /// Arm the next scan to fail with a source error.
    pub fn fail_next_scan(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Speech-map filenames passed to each scan, in order.
    pub fn scans(&self) -> Vec<String> {
        self.scans.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptureSession for MockCaptureSession {
    async fn scan(&self, speech_map_filename: &str) -> CaptureResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::Source(format!(
                "video source '{}' went away",
                self.video_source
            )));
        }
        self.scans.lock().unwrap().push(speech_map_filename.to_string());
        Ok(())
    }
}

impl Drop for MockCaptureSession {
    fn drop(&mut self) {
        tracing::debug!(video_source = %self.video_source, "capture session released");
    }
}
