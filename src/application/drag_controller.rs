// Drag-reorder controller - turns drag gestures into layout reorders
use crate::application::durable_storage::{notify_best_effort, NotificationSink};
use crate::application::layout_store::LayoutStore;
use crate::domain::error::DashboardError;
use crate::domain::notification::Notification;
use crate::domain::widget::WidgetId;
use async_trait::async_trait;
use serde::Serialize;

/// Capability exposed to whatever recognises drag gestures on the host.
#[async_trait]
pub trait DragGestures: Send {
    fn on_drag_start(&mut self);

    /// `destination` is `None` when the card was dropped outside any target.
    async fn on_drag_end(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> Result<DragOutcome, DashboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DragPhase {
    Idle,
    Dragging,
    Committing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DragOutcome {
    Moved {
        widget: WidgetId,
        source: usize,
        destination: usize,
    },
    /// Dropped back onto its own slot.
    Unchanged,
    /// Dropped outside any target.
    Cancelled,
    /// Drag-end arrived without a drag in progress.
    Ignored,
}

#[derive(Debug)]
pub struct DragReorderController {
    phase: DragPhase,
}

impl Default for DragReorderController {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }
}

impl DragReorderController {
    /// Presentation-only drag flag.
    pub fn is_dragging(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    pub fn start(&mut self) {
        if self.phase == DragPhase::Dragging {
            tracing::debug!("drag start while already dragging");
        }
        self.phase = DragPhase::Dragging;
    }

    pub async fn finish(
        &mut self,
        store: &mut LayoutStore,
        sink: &dyn NotificationSink,
        source: usize,
        destination: Option<usize>,
    ) -> Result<DragOutcome, DashboardError> {
        if self.phase != DragPhase::Dragging {
            tracing::warn!(source, ?destination, "drag end without a drag in progress");
            return Ok(DragOutcome::Ignored);
        }

        let Some(destination) = destination else {
            self.phase = DragPhase::Idle;
            tracing::debug!(source, "drag cancelled");
            return Ok(DragOutcome::Cancelled);
        };

        self.phase = DragPhase::Committing;
        let result = store.reorder(source, destination).await;
        self.phase = DragPhase::Idle;

        let widget = result?;
        if source == destination {
            return Ok(DragOutcome::Unchanged);
        }

        tracing::info!(%widget, source, destination, "widget moved");
        notify_best_effort(
            sink,
            Notification::widget_moved(&widget.display_title(), destination),
        );

        Ok(DragOutcome::Moved {
            widget,
            source,
            destination,
        })
    }
}
