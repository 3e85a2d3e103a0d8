//! Hub event loop driver and inbound event dispatcher.
//!
//! Drives the rumqttc event loop, classifying publishes into messages
//! and twin patches and applying them to the module context. Faults are
//! fatal: an event-loop error or an undecodable message payload is
//! returned to the lifecycle controller, which shuts the channel down.

use anyhow::Context;
use rumqttc::{Event, EventLoop, Packet};

use el_hub_channel::{Channel, HubChannel, IncomingMessage, TwinClient, classify};

use crate::context::SharedContext;

/// Drive the hub event loop and dispatch incoming events.
///
/// Returns only on a fault: an event-loop error (the connection is not
/// retried) or a dispatch error.
pub async fn run(
    mut eventloop: EventLoop,
    channel: &HubChannel,
    ctx: &SharedContext,
) -> anyhow::Result<()> {
    let twin = TwinClient::new(channel, channel.device_id(), channel.module_id());

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let msg = classify(&publish);
                dispatch(msg, ctx, &twin).await?;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "hub event loop error");
                return Err(e).context("hub event loop failed");
            }
        }
    }
}

/// Apply one classified inbound event to the module context.
pub async fn dispatch<C: Channel>(
    msg: IncomingMessage,
    ctx: &SharedContext,
    twin: &TwinClient<'_, C>,
) -> anyhow::Result<()> {
    match msg {
        IncomingMessage::Inbound(message) => {
            let size = message.payload.len();
            let text = String::from_utf8(message.payload)
                .context("inbound message payload is not valid UTF-8")?;
            tracing::info!(
                message_id = %message.id,
                data = %text,
                size,
                properties = ?message.properties,
                "message received"
            );
            let total = ctx.record_message();
            tracing::info!(total, "total messages received");
        }
        IncomingMessage::TwinPatch(patch) => {
            tracing::info!(
                version = patch.version,
                patch = %patch.patch,
                "twin patch received"
            );
            if let Some(filename) = patch.speech_map_filename() {
                ctx.set_speech_map_filename(filename).await;
                tracing::info!(speech_map_filename = filename, "speech map updated");
                // Acknowledge the applied value as reported state.
                if let Err(e) = twin.report_state(patch.patch.clone(), patch.version).await {
                    tracing::warn!(error = %e, "failed to acknowledge twin patch");
                }
            }
            let total = ctx.record_twin_callback();
            tracing::info!(total, "total twin callbacks confirmed");
        }
        IncomingMessage::Unknown { topic, .. } => {
            tracing::debug!(topic = %topic, "ignoring unrecognized message");
        }
    }
    Ok(())
}
