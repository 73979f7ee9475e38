// Storage and notification collaborator traits
use crate::domain::notification::Notification;
use async_trait::async_trait;

/// Host key-value store that outlives the process (browser local storage equivalent).
#[async_trait]
pub trait DurableStorage: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Fire-and-forget user notifications. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification) -> anyhow::Result<()>;
}

/// Deliver a notification, logging instead of failing when the sink errors.
pub fn notify_best_effort(sink: &dyn NotificationSink, notification: Notification) {
    let title = notification.title.clone();
    if let Err(e) = sink.notify(notification) {
        tracing::warn!(%title, error = %e, "notification sink rejected notification");
    }
}
