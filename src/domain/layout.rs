// Layout domain model - ordered, duplicate-free widget sequence
use super::error::DashboardError;
use super::widget::{WidgetId, WidgetKind};
use serde::Serialize;
use std::collections::HashSet;

/// Display order of the dashboard. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayoutOrder(Vec<WidgetId>);

impl LayoutOrder {
    /// Build an order from raw ids, keeping the first occurrence of each.
    /// Returns the dropped duplicates alongside the order.
    pub fn from_ids(ids: impl IntoIterator<Item = WidgetId>) -> (Self, Vec<WidgetId>) {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut duplicates = Vec::new();

        for id in ids {
            if seen.insert(id.clone()) {
                order.push(id);
            } else {
                duplicates.push(id);
            }
        }

        (Self(order), duplicates)
    }

    pub fn from_kinds(kinds: &[WidgetKind]) -> Self {
        Self::from_ids(kinds.iter().copied().map(WidgetId::from)).0
    }

    pub fn ids(&self) -> &[WidgetId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.0.contains(id)
    }

    /// Append `id` unless it is already present. Returns whether the order changed.
    pub fn add(&mut self, id: WidgetId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Delete the element at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<WidgetId, DashboardError> {
        self.check(index)?;
        Ok(self.0.remove(index))
    }

    /// Move the element at `source` so it ends up at `destination`.
    /// Returns the moved id.
    pub fn reorder(&mut self, source: usize, destination: usize) -> Result<WidgetId, DashboardError> {
        self.check(source)?;
        self.check(destination)?;

        if source == destination {
            return Ok(self.0[source].clone());
        }

        let moved = self.0.remove(source);
        self.0.insert(destination, moved.clone());
        Ok(moved)
    }

    fn check(&self, index: usize) -> Result<(), DashboardError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(DashboardError::OutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }
}
