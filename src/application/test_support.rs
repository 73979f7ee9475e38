// Test doubles for the storage and notification collaborators
use crate::application::durable_storage::{DurableStorage, NotificationSink};
use crate::domain::notification::Notification;
use async_trait::async_trait;
use std::sync::Mutex;

pub struct FailingStorage;

#[async_trait]
impl DurableStorage for FailingStorage {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage unavailable")
    }

    async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("quota exceeded")
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(notification);
        Ok(())
    }
}

pub struct FailingNotifier;

impl NotificationSink for FailingNotifier {
    fn notify(&self, _notification: Notification) -> anyhow::Result<()> {
        anyhow::bail!("toast queue closed")
    }
}
