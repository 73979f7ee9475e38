// Layout store - persisted widget order with change subscription
use crate::application::durable_storage::DurableStorage;
use crate::domain::error::DashboardError;
use crate::domain::layout::LayoutOrder;
use crate::domain::widget::WidgetId;
use std::sync::Arc;
use tokio::sync::watch;

/// Durable storage key holding the serialized widget order.
pub const STORAGE_KEY: &str = "dashboardWidgets";

pub struct LayoutStore {
    order: LayoutOrder,
    storage: Arc<dyn DurableStorage>,
    changes: watch::Sender<LayoutOrder>,
}

impl LayoutStore {
    /// Load the order from storage, falling back to `default_order` when it is
    /// missing, unreadable or malformed. Never fails.
    pub async fn initialize(storage: Arc<dyn DurableStorage>, default_order: LayoutOrder) -> Self {
        let order = match storage.get(STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WidgetId>>(&raw) {
                Ok(ids) => {
                    let (order, duplicates) = LayoutOrder::from_ids(ids);
                    if !duplicates.is_empty() {
                        tracing::warn!(?duplicates, "dropped duplicate widgets from stored layout");
                    }
                    tracing::debug!(widgets = order.len(), "restored stored layout");
                    order
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored layout is malformed, using default");
                    default_order
                }
            },
            Ok(None) => {
                tracing::debug!("no stored layout, using default");
                default_order
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored layout, using default");
                default_order
            }
        };

        let (changes, _) = watch::channel(order.clone());
        Self {
            order,
            storage,
            changes,
        }
    }

    pub fn order(&self) -> &LayoutOrder {
        &self.order
    }

    /// Observe every committed order.
    pub fn subscribe(&self) -> watch::Receiver<LayoutOrder> {
        self.changes.subscribe()
    }

    /// Append `id` if absent. Returns whether the order changed.
    pub async fn add(&mut self, id: WidgetId) -> bool {
        if !self.order.add(id) {
            return false;
        }
        self.commit().await;
        true
    }

    pub async fn remove(&mut self, position: usize) -> Result<WidgetId, DashboardError> {
        let removed = self.order.remove(position)?;
        self.commit().await;
        Ok(removed)
    }

    pub async fn reorder(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<WidgetId, DashboardError> {
        let moved = self.order.reorder(source, destination)?;
        if source != destination {
            self.commit().await;
        }
        Ok(moved)
    }

    /// Publish the new order and write it through. Write failures leave the
    /// in-memory order authoritative; the next mutation retries.
    async fn commit(&mut self) {
        self.changes.send_replace(self.order.clone());

        let serialized = match serde_json::to_string(&self.order) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize layout");
                return;
            }
        };

        if let Err(e) = self.storage.set(STORAGE_KEY, &serialized).await {
            tracing::warn!(error = %e, "failed to persist layout, keeping in-memory order");
        }
    }
}
