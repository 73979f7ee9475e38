// Expansion domain model
use super::layout::LayoutOrder;
use super::widget::WidgetId;
use std::collections::HashMap;

/// Per-widget expanded flag. An absent key means collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionMap(HashMap<WidgetId, bool>);

impl ExpansionMap {
    pub fn seeded(expanded: impl IntoIterator<Item = WidgetId>) -> Self {
        Self(expanded.into_iter().map(|id| (id, true)).collect())
    }

    pub fn is_expanded(&self, id: &WidgetId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Flip the flag for `id` and return the new value.
    pub fn toggle(&mut self, id: &WidgetId) -> bool {
        let flag = self.0.entry(id.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Returns whether an entry was dropped.
    pub fn forget(&mut self, id: &WidgetId) -> bool {
        self.0.remove(id).is_some()
    }

    /// Drop entries for widgets no longer in `order`.
    pub fn prune(&mut self, order: &LayoutOrder) {
        self.0.retain(|id, _| order.contains(id));
    }

    /// Currently expanded ids, sorted.
    pub fn expanded(&self) -> Vec<WidgetId> {
        let mut ids: Vec<_> = self
            .0
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }
}
