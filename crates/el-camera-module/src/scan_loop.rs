//! The 1 Hz capture scheduling loop.
//!
//! Invokes the capture session once per tick with the current speech-map
//! filename, so a twin patch changes which map the next scan uses. The
//! loop exits cooperatively when the stop flag is set; a scan fault
//! propagates to the lifecycle controller.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::capture::{CaptureResult, CaptureSession};
use crate::context::SharedContext;

/// Fixed idle interval between scans.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(1);

/// Run the scan loop until the stop flag is set or a scan fails.
///
/// The first scan fires immediately; each later one after `interval`.
/// The stop flag is consulted once per iteration, so termination takes
/// effect within one interval.
pub async fn run<S: CaptureSession>(
    session: &S,
    ctx: &SharedContext,
    interval: Duration,
    stop: watch::Receiver<bool>,
) -> CaptureResult<()> {
    let mut ticker = time::interval(interval);

    loop {
        ticker.tick().await;

        if *stop.borrow() {
            tracing::info!("stop flag set, exiting scan loop");
            return Ok(());
        }

        let speech_map = ctx.speech_map_filename().await;
        session.scan(&speech_map).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::capture::MockCaptureSession;
    use crate::config::ModuleConfig;
    use crate::context::ModuleContext;

    fn setup() -> (MockCaptureSession, SharedContext) {
        let session = MockCaptureSession::open(&ModuleConfig::default()).unwrap();
        let ctx = Arc::new(ModuleContext::new("speech_map_american.json"));
        (session, ctx)
    }

    #[tokio::test(start_paused = true)]
    async fn stop_flag_exits_loop_cleanly() {
        let (session, ctx) = setup();
        let (stop_tx, stop_rx) = watch::channel(false);

        let loop_fut = run(&session, &ctx, Duration::from_secs(1), stop_rx);
        tokio::pin!(loop_fut);

        // Let a few ticks elapse, then raise the flag.
        for _ in 0..3 {
            tokio::select! {
                res = &mut loop_fut => panic!("loop exited early: {res:?}"),
                _ = time::sleep(Duration::from_millis(1100)) => {}
            }
        }
        stop_tx.send(true).unwrap();

        loop_fut.await.unwrap();
        assert!(session.scans().len() >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn scans_use_current_speech_map() {
        let (session, ctx) = setup();
        let (_stop_tx, stop_rx) = watch::channel(false);

        let loop_fut = run(&session, &ctx, Duration::from_secs(1), stop_rx);
        tokio::pin!(loop_fut);

        tokio::select! {
            res = &mut loop_fut => panic!("loop exited early: {res:?}"),
            _ = time::sleep(Duration::from_millis(1500)) => {}
        }

        // Simulate a twin patch landing between iterations.
        ctx.set_speech_map_filename("m2.json").await;

        tokio::select! {
            res = &mut loop_fut => panic!("loop exited early: {res:?}"),
            _ = time::sleep(Duration::from_secs(2)) => {}
        }

        let scans = session.scans();
        assert_eq!(scans.first().map(String::as_str), Some("speech_map_american.json"));
        assert_eq!(scans.last().map(String::as_str), Some("m2.json"));
    }

    #[tokio::test(start_paused = true)]
    async fn scan_fault_propagates() {
        let (session, ctx) = setup();
        let (_stop_tx, stop_rx) = watch::channel(false);

        session.fail_next_scan();
        let err = run(&session, &ctx, Duration::from_secs(1), stop_rx)
            .await
            .err()
            .expect("loop should fail");
        assert!(err.to_string().contains("video source"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_scan_means_no_scans() {
        let (session, ctx) = setup();
        let (stop_tx, stop_rx) = watch::channel(false);
        stop_tx.send(true).unwrap();

        run(&session, &ctx, Duration::from_secs(1), stop_rx)
            .await
            .unwrap();
        assert!(session.scans().is_empty());
    }
}
