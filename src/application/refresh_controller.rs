// Refresh controller - dashboard-wide loading flag with simulated bulk refresh
use crate::application::durable_storage::{notify_best_effort, NotificationSink};
use crate::domain::notification::Notification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct RefreshController {
    loading: Arc<AtomicBool>,
    sink: Arc<dyn NotificationSink>,
    delay: Duration,
}

impl RefreshController {
    pub fn new(sink: Arc<dyn NotificationSink>, delay: Duration) -> Self {
        Self {
            loading: Arc::new(AtomicBool::new(false)),
            sink,
            delay,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Start a refresh unless one is already running.
    ///
    /// Returns the task that clears the loading flag, or `None` when the
    /// request was absorbed by the refresh in flight. Once started a refresh
    /// always runs to completion.
    pub fn request(&self) -> Option<JoinHandle<()>> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("refresh already in progress");
            return None;
        }

        tracing::info!(delay_ms = self.delay.as_millis() as u64, "dashboard refresh started");

        let loading = self.loading.clone();
        let sink = self.sink.clone();
        let delay = self.delay;
        let started = Instant::now();

        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            loading.store(false, Ordering::Release);

            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "dashboard refresh complete"
            );
            notify_best_effort(sink.as_ref(), Notification::dashboard_refreshed());
        }))
    }
}
