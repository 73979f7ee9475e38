// Dashboard service - composes stores and controllers into the rendered grid
use crate::application::drag_controller::{DragGestures, DragOutcome, DragReorderController};
use crate::application::durable_storage::{notify_best_effort, DurableStorage, NotificationSink};
use crate::application::expansion_store::ExpansionStore;
use crate::application::layout_store::LayoutStore;
use crate::domain::dashboard::{CardContent, DashboardView, GridState, WidgetCard};
use crate::domain::error::DashboardError;
use crate::domain::expansion::ExpansionMap;
use crate::domain::layout::LayoutOrder;
use crate::domain::notification::Notification;
use crate::domain::registry::WidgetRegistry;
use crate::domain::viewport::ColumnCount;
use crate::domain::widget::{effective_size, WidgetId, WidgetKind, WidgetSize};
use crate::infrastructure::config::LayoutSettings;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Footprint of the error slot shown for ids the registry cannot resolve.
const DEFECT_SIZE: WidgetSize = WidgetSize::new(1, 1);

/// Receivers for every input of the composed view.
pub struct DashboardWatch {
    pub layout: watch::Receiver<LayoutOrder>,
    pub expansion: watch::Receiver<ExpansionMap>,
    pub grid: watch::Receiver<GridState>,
}

pub struct Dashboard {
    registry: Arc<WidgetRegistry>,
    layout: LayoutStore,
    expansion: ExpansionStore,
    drag: DragReorderController,
    columns: ColumnCount,
    grid: watch::Sender<GridState>,
    sink: Arc<dyn NotificationSink>,
}

impl Dashboard {
    pub async fn initialize(
        storage: Arc<dyn DurableStorage>,
        sink: Arc<dyn NotificationSink>,
        registry: Arc<WidgetRegistry>,
        settings: &LayoutSettings,
    ) -> Self {
        let layout =
            LayoutStore::initialize(storage, LayoutOrder::from_kinds(&settings.default_order)).await;
        let expansion = ExpansionStore::new(
            settings.expanded.iter().copied().map(WidgetId::from),
            layout.order(),
        );
        let columns = ColumnCount::for_width(settings.viewport_width);

        tracing::info!(
            widgets = layout.order().len(),
            columns = columns.get(),
            "dashboard initialized"
        );

        let (grid, _) = watch::channel(GridState {
            columns: columns.get(),
            dragging: false,
        });

        Self {
            registry,
            layout,
            expansion,
            drag: DragReorderController::default(),
            columns,
            grid,
            sink,
        }
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn order(&self) -> &LayoutOrder {
        self.layout.order()
    }

    pub fn subscribe(&self) -> DashboardWatch {
        DashboardWatch {
            layout: self.layout.subscribe(),
            expansion: self.expansion.subscribe(),
            grid: self.grid.subscribe(),
        }
    }

    /// Recompute the column count for a new viewport width.
    pub fn resize(&mut self, width_px: u32) -> ColumnCount {
        let columns = ColumnCount::for_width(width_px);
        if columns != self.columns {
            tracing::debug!(width_px, from = self.columns.get(), to = columns.get(), "columns changed");
            self.columns = columns;
            self.publish_grid();
        }
        columns
    }

    /// Add a widget if it is not already on the dashboard.
    pub async fn add(&mut self, kind: WidgetKind) -> bool {
        let added = self.layout.add(kind.into()).await;
        if added {
            tracing::info!(widget = %kind, "widget added");
            notify_best_effort(self.sink.as_ref(), Notification::widget_added(kind.title()));
        } else {
            tracing::debug!(widget = %kind, "widget already on dashboard");
        }
        added
    }

    pub async fn remove(&mut self, position: usize) -> Result<WidgetId, DashboardError> {
        let removed = self.layout.remove(position).await?;
        self.expansion.forget(&removed);
        tracing::info!(widget = %removed, position, "widget removed");
        Ok(removed)
    }

    pub fn toggle_expansion(&mut self, id: &WidgetId) -> Result<bool, DashboardError> {
        if !self.layout.order().contains(id) {
            return Err(DashboardError::NotOnDashboard(id.to_string()));
        }
        Ok(self.expansion.toggle(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn publish_grid(&self) {
        let next = GridState {
            columns: self.columns.get(),
            dragging: self.drag.is_dragging(),
        };
        self.grid.send_if_modified(|current| {
            let changed = *current != next;
            *current = next;
            changed
        });
    }

    /// Resolve every placed widget into a card, in display order.
    pub fn compose(&self, loading: bool) -> DashboardView {
        let columns = self.columns.get();

        let cards = self
            .layout
            .order()
            .ids()
            .iter()
            .enumerate()
            .map(|(position, id)| {
                let expanded = self.expansion.is_expanded(id);
                let resolved = id
                    .kind()
                    .and_then(|kind| {
                        self.registry
                            .get(kind)
                            .ok_or_else(|| DashboardError::UnknownWidget(id.to_string()))
                    });

                let (base, content) = match resolved {
                    Ok(descriptor) => (
                        descriptor.size,
                        CardContent::Widget {
                            widget: descriptor.id,
                            title: descriptor.title,
                            source: descriptor.source,
                        },
                    ),
                    Err(e) => (
                        DEFECT_SIZE,
                        CardContent::ConfigurationDefect {
                            message: e.to_string(),
                        },
                    ),
                };

                WidgetCard {
                    position,
                    id: id.to_string(),
                    size: effective_size(base, expanded, columns),
                    expanded,
                    loading,
                    content,
                }
            })
            .collect();

        let view = DashboardView {
            columns,
            dragging: self.drag.is_dragging(),
            loading,
            cards,
        };

        for card in view.defects() {
            tracing::error!(
                widget = %card.id,
                position = card.position,
                "layout references a widget missing from the registry"
            );
        }

        view
    }
}

#[async_trait]
impl DragGestures for Dashboard {
    fn on_drag_start(&mut self) {
        self.drag.start();
        self.publish_grid();
    }

    async fn on_drag_end(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> Result<DragOutcome, DashboardError> {
        let outcome = self
            .drag
            .finish(&mut self.layout, self.sink.as_ref(), source, destination)
            .await;
        self.publish_grid();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::layout_store::STORAGE_KEY;
    use crate::application::test_support::RecordingNotifier;
    use crate::infrastructure::memory_storage::MemoryStorage;

    fn settings() -> LayoutSettings {
        LayoutSettings {
            default_order: vec![WidgetKind::Portfolio, WidgetKind::ChartWidget, WidgetKind::CryptoNews],
            expanded: vec![WidgetKind::Portfolio],
            viewport_width: 1280,
        }
    }

    async fn dashboard_with(storage: Arc<MemoryStorage>) -> (Dashboard, Arc<RecordingNotifier>) {
        let sink = Arc::new(RecordingNotifier::default());
        let dashboard = Dashboard::initialize(
            storage,
            sink.clone(),
            Arc::new(WidgetRegistry::default()),
            &settings(),
        )
        .await;
        (dashboard, sink)
    }

    async fn dashboard() -> (Dashboard, Arc<RecordingNotifier>) {
        dashboard_with(Arc::new(MemoryStorage::default())).await
    }

    #[tokio::test]
    async fn test_compose_resolves_sizes_and_expansion() {
        let (dashboard, _) = dashboard().await;
        let view = dashboard.compose(false);

        assert_eq!(view.columns, 3);
        assert_eq!(view.cards.len(), 3);

        let portfolio = &view.cards[0];
        assert!(portfolio.expanded);
        assert_eq!(portfolio.size, WidgetSize::new(3, 4));

        let news = &view.cards[2];
        assert!(!news.expanded);
        assert_eq!(news.size, WidgetKind::CryptoNews.default_size());
        assert_eq!(news.position, 2);
    }

    #[tokio::test]
    async fn test_expanded_width_follows_columns() {
        let (mut dashboard, _) = dashboard().await;
        assert_eq!(dashboard.resize(800).get(), 2);

        let view = dashboard.compose(false);
        assert_eq!(view.cards[0].size, WidgetSize::new(2, 4));
    }

    #[tokio::test]
    async fn test_loading_flag_reaches_every_card() {
        let (dashboard, _) = dashboard().await;
        let view = dashboard.compose(true);
        assert!(view.loading);
        assert!(view.cards.iter().all(|c| c.loading));
    }

    #[tokio::test]
    async fn test_unknown_stored_id_surfaces_as_defect() {
        let storage = Arc::new(MemoryStorage::default());
        storage
            .set(STORAGE_KEY, r#"["Portfolio","DefiYields"]"#)
            .await
            .unwrap();
        let (dashboard, _) = dashboard_with(storage).await;

        let view = dashboard.compose(false);
        assert_eq!(view.cards.len(), 2);

        let defects: Vec<_> = view.defects().collect();
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].id, "DefiYields");
        assert_eq!(defects[0].position, 1);
    }

    #[tokio::test]
    async fn test_add_notifies_once() {
        let (mut dashboard, sink) = dashboard().await;

        assert!(dashboard.add(WidgetKind::SnakeGame).await);
        assert!(!dashboard.add(WidgetKind::SnakeGame).await);

        assert_eq!(dashboard.order().len(), 4);
        assert_eq!(sink.titles(), vec!["Widget added".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_prunes_expansion() {
        let (mut dashboard, _) = dashboard().await;

        let removed = dashboard.remove(0).await.unwrap();
        assert_eq!(removed, WidgetId::from(WidgetKind::Portfolio));

        dashboard.add(WidgetKind::Portfolio).await;
        let view = dashboard.compose(false);
        let readded = view.cards.last().unwrap();
        assert_eq!(readded.id, "Portfolio");
        assert!(!readded.expanded);
    }

    #[tokio::test]
    async fn test_toggle_requires_placed_widget() {
        let (mut dashboard, _) = dashboard().await;

        assert_eq!(dashboard.toggle_expansion(&WidgetKind::CryptoNews.into()), Ok(true));
        assert_eq!(
            dashboard.toggle_expansion(&WidgetKind::SnakeGame.into()),
            Err(DashboardError::NotOnDashboard("SnakeGame".to_string()))
        );
    }

    #[tokio::test]
    async fn test_drag_gestures_drive_layout() {
        let (mut dashboard, sink) = dashboard().await;

        dashboard.on_drag_start();
        assert!(dashboard.compose(false).dragging);

        let outcome = dashboard.on_drag_end(2, Some(0)).await.unwrap();
        assert!(matches!(outcome, DragOutcome::Moved { destination: 0, .. }));
        assert!(!dashboard.is_dragging());
        assert_eq!(dashboard.compose(false).cards[0].id, "CryptoNews");
        assert_eq!(sink.titles(), vec!["Widget moved".to_string()]);
    }

    #[tokio::test]
    async fn test_grid_state_tracks_columns_and_drag() {
        let (mut dashboard, _) = dashboard().await;
        let mut grid = dashboard.subscribe().grid;
        assert_eq!(*grid.borrow_and_update(), GridState { columns: 3, dragging: false });

        dashboard.resize(1100);
        assert!(!grid.has_changed().unwrap());

        dashboard.resize(700);
        assert_eq!(*grid.borrow_and_update(), GridState { columns: 2, dragging: false });

        dashboard.on_drag_start();
        assert_eq!(*grid.borrow_and_update(), GridState { columns: 2, dragging: true });

        dashboard.on_drag_end(0, None).await.unwrap();
        assert!(grid.has_changed().unwrap());
        assert!(!grid.borrow_and_update().dragging);
    }

    #[tokio::test]
    async fn test_cancelled_drag_changes_nothing() {
        let (mut dashboard, sink) = dashboard().await;
        let before = dashboard.order().clone();

        dashboard.on_drag_start();
        let outcome = dashboard.on_drag_end(1, None).await.unwrap();

        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(dashboard.order(), &before);
        assert!(sink.titles().is_empty());
    }
}
