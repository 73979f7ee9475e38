// Dashboard domain model - the composed grid handed to the client
use super::widget::{WidgetKind, WidgetSize};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub columns: u8,
    pub dragging: bool,
    pub loading: bool,
    pub cards: Vec<WidgetCard>,
}

/// Grid-wide presentation state outside the layout and expansion stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridState {
    pub columns: u8,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetCard {
    pub position: usize,
    pub id: String,
    pub size: WidgetSize,
    pub expanded: bool,
    pub loading: bool,
    pub content: CardContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CardContent {
    Widget {
        widget: WidgetKind,
        title: &'static str,
        source: &'static str,
    },
    /// Persisted id with no registry entry; rendered as a visible error slot.
    ConfigurationDefect { message: String },
}

impl DashboardView {
    pub fn defects(&self) -> impl Iterator<Item = &WidgetCard> {
        self.cards
            .iter()
            .filter(|c| matches!(c.content, CardContent::ConfigurationDefect { .. }))
    }
}
