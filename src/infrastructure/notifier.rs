// Broadcast notification sink - fans toasts out to every connected event stream
use crate::application::durable_storage::NotificationSink;
use crate::domain::notification::Notification;
use tokio::sync::broadcast;

const NOTIFICATION_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self { tx }
    }
}

impl BroadcastNotifier {
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl NotificationSink for BroadcastNotifier {
    fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        tracing::info!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );
        // No listeners is fine: the toast simply has nobody to show it.
        let _ = self.tx.send(notification);
        Ok(())
    }
}
