//! Scheduled channel pushes
//!
//! Optional background loop that runs the notification pipeline against the
//! configured channel at a fixed interval, always with the default `all`
//! category. Deployments that prefer an external cron leave the interval
//! unset and trigger pushes through `POST /send-news` instead; both paths
//! run the same pipeline and record their outcome for `GET /status`.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::pipeline::{NotificationPipeline, Outcome};
use crate::types::{DeliveryTarget, PushRecord};

/// Shared record of the most recent push, whatever triggered it
#[derive(Debug, Default)]
pub struct PushStatus {
    last: Mutex<Option<PushRecord>>,
}

impl PushStatus {
    /// Record the outcome of a completed push run
    pub fn record(&self, outcome: Outcome) {
        let record = PushRecord {
            at: Utc::now(),
            outcome: outcome.as_str().to_string(),
        };
        if let Ok(mut last) = self.last.lock() {
            *last = Some(record);
        }
    }

    /// The most recent push record, if any push has run yet
    pub fn last(&self) -> Option<PushRecord> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

/// Background scheduler that pushes the newest article to a fixed channel
pub struct PushScheduler {
    pipeline: Arc<NotificationPipeline>,
    channel_id: DeliveryTarget,
    push_interval: Duration,
    status: Arc<PushStatus>,
    cancel: CancellationToken,
}

impl PushScheduler {
    /// Create a scheduler pushing to `channel_id` every `push_interval`
    pub fn new(
        pipeline: Arc<NotificationPipeline>,
        channel_id: DeliveryTarget,
        push_interval: Duration,
        status: Arc<PushStatus>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            pipeline,
            channel_id,
            push_interval,
            status,
            cancel,
        }
    }

    /// Run the push loop until the cancellation token fires
    ///
    /// The first push happens immediately on start; subsequent pushes follow
    /// the configured interval. A push that overruns its slot is not stacked,
    /// the missed tick is skipped.
    pub async fn run(self) {
        info!(
            channel = %self.channel_id,
            interval_secs = self.push_interval.as_secs(),
            "Push scheduler started"
        );

        let mut ticker = interval(self.push_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Push scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {
                    let outcome = self.pipeline.run(&self.channel_id, None).await;
                    self.status.record(outcome);
                    info!(channel = %self.channel_id, %outcome, "Scheduled push complete");
                }
            }
        }
    }
}
