// Widget registry - read-only lookup from kind to its rendering descriptor
use super::layout::LayoutOrder;
use super::widget::{WidgetId, WidgetKind, WidgetSize};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescriptor {
    pub id: WidgetKind,
    pub title: &'static str,
    pub source: &'static str,
    pub size: WidgetSize,
}

#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    entries: HashMap<WidgetKind, WidgetDescriptor>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_sizes(&HashMap::new())
    }
}

impl WidgetRegistry {
    /// Build the registry from the built-in defaults, replacing sizes found in `overrides`.
    pub fn with_sizes(overrides: &HashMap<WidgetKind, WidgetSize>) -> Self {
        let entries = WidgetKind::ALL
            .into_iter()
            .map(|kind| {
                let size = overrides
                    .get(&kind)
                    .copied()
                    .unwrap_or_else(|| kind.default_size());
                let descriptor = WidgetDescriptor {
                    id: kind,
                    title: kind.title(),
                    source: kind.source(),
                    size,
                };
                (kind, descriptor)
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, kind: WidgetKind) -> Option<&WidgetDescriptor> {
        self.entries.get(&kind)
    }

    /// Descriptors in registry order.
    pub fn descriptors(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        WidgetKind::ALL
            .iter()
            .filter_map(|kind| self.entries.get(kind))
    }

    /// Kinds that can still be added to `order`.
    pub fn available(&self, order: &LayoutOrder) -> Vec<WidgetKind> {
        self.descriptors()
            .map(|d| d.id)
            .filter(|kind| !order.contains(&WidgetId::from(*kind)))
            .collect()
    }
}
