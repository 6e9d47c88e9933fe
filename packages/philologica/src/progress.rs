//! Cosmetic progress animation.
//!
//! The upload transport reports no progress, so the bar creeps toward a cap on a fixed
//! timer while the request is outstanding. It carries no information about the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::view::UploadView;

pub const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSettings {
    pub tick: Duration,
    pub step: u8,
    /// The animation never goes past this value on its own.
    pub cap: u8,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            step: 2,
            cap: 90,
        }
    }
}

pub struct ProgressAnimation {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressAnimation {
    /// Starts at 0% and adds `step` every `tick` until `cap`.
    pub fn start(view: Arc<dyn UploadView>, settings: ProgressSettings) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        // `interval_at` rejects a zero period.
        let tick = settings.tick.max(MIN_TICK);
        let handle = tokio::spawn(async move {
            view.set_progress(0);
            let mut percent = 0u8;
            let mut ticker = interval_at(Instant::now() + tick, tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            while percent < settings.cap {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return,
                    _ = ticker.tick() => {
                        percent = percent.saturating_add(settings.step).min(settings.cap);
                        view.set_progress(percent);
                    }
                }
            }
            token.cancelled().await;
        });
        Self { cancel, handle }
    }

    /// Cancels the animation and waits for its task, so no tick lands after this returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Err(err) = (&mut self.handle).await {
            warn!(error = %err, "progress animation ended abnormally");
        }
    }
}

impl Drop for ProgressAnimation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
