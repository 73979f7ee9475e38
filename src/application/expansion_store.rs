// Expansion store - session-scoped expanded flags, not persisted
use crate::domain::expansion::ExpansionMap;
use crate::domain::layout::LayoutOrder;
use crate::domain::widget::WidgetId;
use tokio::sync::watch;

pub struct ExpansionStore {
    map: watch::Sender<ExpansionMap>,
}

impl ExpansionStore {
    /// Start with `seed` pre-expanded. Seeds absent from `order` are dropped.
    pub fn new(seed: impl IntoIterator<Item = WidgetId>, order: &LayoutOrder) -> Self {
        let mut map = ExpansionMap::seeded(seed);
        map.prune(order);
        let (map, _) = watch::channel(map);
        Self { map }
    }

    pub fn is_expanded(&self, id: &WidgetId) -> bool {
        self.map.borrow().is_expanded(id)
    }

    /// Observe the map after every toggle or forget.
    pub fn subscribe(&self) -> watch::Receiver<ExpansionMap> {
        self.map.subscribe()
    }

    pub fn toggle(&mut self, id: &WidgetId) -> bool {
        let mut expanded = false;
        self.map.send_modify(|map| expanded = map.toggle(id));
        tracing::debug!(widget = %id, expanded, "toggled widget expansion");
        expanded
    }

    pub fn forget(&mut self, id: &WidgetId) {
        self.map.send_if_modified(|map| map.forget(id));
    }
}
