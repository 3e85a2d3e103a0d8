//! edgelens camera module — edge runtime entry point.
//!
//! Connects to the hub through the ambient edge environment, registers
//! the module's inbound subscriptions, and drives the 1 Hz capture loop
//! until a termination signal or a fault stops it.

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use el_camera_module::capture::MockCaptureSession;
use el_camera_module::config::ModuleConfig;
use el_camera_module::context::ModuleContext;
use el_camera_module::{events, scan_loop, signal};
use el_hub_channel::{Channel, EdgeEnv, HubChannel, register_subscriptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "el-camera-module starting"
    );

    // ── Ambient edge environment ────────────────────────────────
    let env = EdgeEnv::from_env().context("module must run under an edge runtime")?;
    tracing::info!(
        device_id = %env.device_id,
        module_id = %env.module_id,
        gateway_host = %env.gateway_host,
        "edge environment resolved"
    );

    // ── Hub channel ─────────────────────────────────────────────
    let (channel, eventloop) = HubChannel::connect(&env)?;
    register_subscriptions(&channel, channel.device_id(), channel.module_id())
        .await
        .context("failed to register hub subscriptions")?;
    tracing::info!("hub subscriptions active");

    // ── Termination signal → stop flag ──────────────────────────
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(signal::watch_for_termination(stop_tx));

    // ── Module configuration ────────────────────────────────────
    let config = ModuleConfig::from_env();
    tracing::info!(
        video_source = %config.video_source,
        predict_threshold = config.predict_threshold,
        inference_endpoint = %config.inference_endpoint,
        speech_map_filename = %config.speech_map_filename,
        "config resolved"
    );

    let ctx = std::sync::Arc::new(ModuleContext::new(config.speech_map_filename.clone()));

    // ── Capture session (mock for now — OpenCV driver lands with
    //    real camera hardware) ───────────────────────────────────
    let session = MockCaptureSession::open(&config)?;

    tracing::info!("el-camera-module ready");

    let outcome: anyhow::Result<()> = tokio::select! {
        // Scan once per second until the stop flag is raised.
        res = scan_loop::run(&session, &ctx, scan_loop::SCAN_INTERVAL, stop_rx) => {
            res.context("scan loop fault")
        }
        // Dispatch inbound messages and twin patches.
        res = events::run(eventloop, &channel, &ctx) => {
            res.context("event dispatcher fault")
        }
    };

    if let Err(e) = &outcome {
        tracing::error!(error = ?e, "unexpected fault, shutting down");
    }

    // Release the hub connection exactly once, on every exit path.
    if let Err(e) = channel.shutdown().await {
        tracing::warn!(error = %e, "hub channel shutdown failed");
    }

    tracing::info!(
        received_messages = ctx.received_messages(),
        twin_callbacks = ctx.twin_callbacks(),
        "el-camera-module stopped"
    );
    outcome
}
