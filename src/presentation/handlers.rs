// HTTP request handlers
use crate::application::drag_controller::{DragGestures, DragOutcome};
use crate::domain::dashboard::DashboardView;
use crate::domain::registry::WidgetDescriptor;
use crate::domain::widget::{WidgetId, WidgetKind};
use crate::infrastructure::event_stream::stream_events;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ViewportQuery {
    pub width: Option<u32>,
}

#[derive(Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
}

#[derive(Serialize)]
pub struct ViewportResponse {
    pub columns: u8,
}

#[derive(Deserialize)]
pub struct AddWidgetRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct DragEndRequest {
    pub source: usize,
    #[serde(default)]
    pub destination: Option<usize>,
}

#[derive(Serialize)]
pub struct RegistryEntry {
    #[serde(flatten)]
    pub descriptor: WidgetDescriptor,
    pub placed: bool,
}

#[derive(Serialize)]
pub struct AddWidgetResponse {
    pub added: bool,
    pub dashboard: DashboardView,
}

#[derive(Serialize)]
pub struct RemoveWidgetResponse {
    pub removed: WidgetId,
    pub dashboard: DashboardView,
}

#[derive(Serialize)]
pub struct ExpansionResponse {
    pub expanded: bool,
    pub dashboard: DashboardView,
}

#[derive(Serialize)]
pub struct DragStartResponse {
    pub dragging: bool,
}

#[derive(Serialize)]
pub struct DragEndResponse {
    #[serde(flatten)]
    pub outcome: DragOutcome,
    pub dashboard: DashboardView,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub started: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List every registered widget with its default size
pub async fn list_registry(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let entries: Vec<RegistryEntry> = {
        let dashboard = state.dashboard.lock().await;
        let available = dashboard.registry().available(dashboard.order());
        dashboard
            .registry()
            .descriptors()
            .map(|d| RegistryEntry {
                descriptor: d.clone(),
                placed: !available.contains(&d.id),
            })
            .collect()
    };

    match json_response(&entries, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Composed dashboard, optionally resizing to the caller's viewport first
pub async fn get_dashboard(
    Query(query): Query<ViewportQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let view = {
        let mut dashboard = state.dashboard.lock().await;
        if let Some(width) = query.width {
            dashboard.resize(width);
        }
        dashboard.compose(state.refresh.is_loading())
    };

    match json_response(&view, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn set_viewport(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewportRequest>,
) -> Json<ViewportResponse> {
    let columns = state.dashboard.lock().await.resize(request.width);
    Json(ViewportResponse {
        columns: columns.get(),
    })
}

pub async fn add_widget(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddWidgetRequest>,
) -> Result<Json<AddWidgetResponse>, ApiError> {
    let kind: WidgetKind = request.id.parse()?;

    let mut dashboard = state.dashboard.lock().await;
    let added = dashboard.add(kind).await;
    Ok(Json(AddWidgetResponse {
        added,
        dashboard: dashboard.compose(state.refresh.is_loading()),
    }))
}

pub async fn remove_widget(
    Path(position): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RemoveWidgetResponse>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let removed = dashboard.remove(position).await?;
    Ok(Json(RemoveWidgetResponse {
        removed,
        dashboard: dashboard.compose(state.refresh.is_loading()),
    }))
}

pub async fn toggle_expansion(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpansionResponse>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let expanded = dashboard.toggle_expansion(&WidgetId::new(id))?;
    Ok(Json(ExpansionResponse {
        expanded,
        dashboard: dashboard.compose(state.refresh.is_loading()),
    }))
}

pub async fn drag_start(State(state): State<Arc<AppState>>) -> Json<DragStartResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.on_drag_start();
    Json(DragStartResponse {
        dragging: dashboard.is_dragging(),
    })
}

pub async fn drag_end(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DragEndRequest>,
) -> Result<Json<DragEndResponse>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let outcome = dashboard
        .on_drag_end(request.source, request.destination)
        .await?;
    Ok(Json(DragEndResponse {
        outcome,
        dashboard: dashboard.compose(state.refresh.is_loading()),
    }))
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let started = state.refresh.request().is_some();
    Json(RefreshResponse { started })
}

/// Stream notifications and dashboard state changes as newline-delimited JSON
pub async fn stream_dashboard_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let watch = state.dashboard.lock().await.subscribe();
    stream_events(state.notifier.subscribe(), watch)
}
