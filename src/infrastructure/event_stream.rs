// Chunked NDJSON event streaming
use crate::application::dashboard_service::DashboardWatch;
use crate::domain::dashboard::GridState;
use crate::domain::layout::LayoutOrder;
use crate::domain::notification::Notification;
use crate::domain::widget::WidgetId;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    /// Current widget order. Sent on connect and after every change.
    Layout { widgets: LayoutOrder },
    /// Ids currently expanded. Sent on connect and after every toggle.
    Expansion { expanded: Vec<WidgetId> },
    Grid(GridState),
    Notification(Notification),
}

/// Merge dashboard state changes and notifications into one message stream.
pub fn dashboard_events(
    notifications: broadcast::Receiver<Notification>,
    watch: DashboardWatch,
) -> impl Stream<Item = StreamMessage> + Send + 'static {
    use tokio_stream::StreamExt;

    let layout = WatchStream::new(watch.layout).map(|widgets| StreamMessage::Layout { widgets });
    let expansion = WatchStream::new(watch.expansion).map(|map| StreamMessage::Expansion {
        expanded: map.expanded(),
    });
    let grid = WatchStream::new(watch.grid).map(StreamMessage::Grid);
    let notifications = BroadcastStream::new(notifications).filter_map(|item| match item {
        Ok(notification) => Some(StreamMessage::Notification(notification)),
        Err(e) => {
            tracing::warn!(error = %e, "event stream lagged, notifications dropped");
            None
        }
    });

    layout.merge(expansion).merge(grid).merge(notifications)
}

/// Create a chunked NDJSON streaming response
pub fn ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    use futures::StreamExt;

    let byte_stream = stream.map(serialize_chunk);
    let body = Body::from_stream(byte_stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message as one newline-terminated JSON line
fn serialize_chunk(msg: StreamMessage) -> Result<Bytes, std::io::Error> {
    let mut line = serde_json::to_vec(&msg).map_err(std::io::Error::other)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Helper to create a streaming response from the dashboard's channels
pub fn stream_events(
    notifications: broadcast::Receiver<Notification>,
    watch: DashboardWatch,
) -> impl IntoResponse {
    match ndjson_stream(dashboard_events(notifications, watch)) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::Dashboard;
    use crate::domain::registry::WidgetRegistry;
    use crate::domain::widget::WidgetKind;
    use crate::infrastructure::config::LayoutSettings;
    use crate::infrastructure::memory_storage::MemoryStorage;
    use crate::infrastructure::notifier::BroadcastNotifier;
    use std::sync::Arc;
    use tokio_stream::StreamExt;

    async fn dashboard() -> (Dashboard, BroadcastNotifier) {
        let notifier = BroadcastNotifier::default();
        let dashboard = Dashboard::initialize(
            Arc::new(MemoryStorage::default()),
            Arc::new(notifier.clone()),
            Arc::new(WidgetRegistry::default()),
            &LayoutSettings::default(),
        )
        .await;
        (dashboard, notifier)
    }

    #[tokio::test]
    async fn test_connect_sends_a_snapshot_of_every_input() {
        let (dashboard, notifier) = dashboard().await;
        let events = dashboard_events(notifier.subscribe(), dashboard.subscribe());
        tokio::pin!(events);

        let mut snapshot = Vec::new();
        for _ in 0..3 {
            snapshot.push(events.next().await.unwrap());
        }

        assert!(snapshot.contains(&StreamMessage::Layout {
            widgets: dashboard.order().clone()
        }));
        assert!(snapshot.contains(&StreamMessage::Expansion {
            expanded: vec![WidgetKind::Portfolio.into()]
        }));
        assert!(snapshot.contains(&StreamMessage::Grid(GridState {
            columns: 3,
            dragging: false
        })));
    }

    #[tokio::test]
    async fn test_stream_follows_dashboard_changes() {
        let (mut dashboard, notifier) = dashboard().await;
        let events = dashboard_events(notifier.subscribe(), dashboard.subscribe());
        tokio::pin!(events);
        for _ in 0..3 {
            events.next().await.unwrap();
        }

        dashboard.toggle_expansion(&WidgetKind::CryptoNews.into()).unwrap();
        assert_eq!(
            events.next().await,
            Some(StreamMessage::Expansion {
                expanded: vec![WidgetKind::CryptoNews.into(), WidgetKind::Portfolio.into()]
            })
        );

        dashboard.resize(500);
        assert_eq!(
            events.next().await,
            Some(StreamMessage::Grid(GridState {
                columns: 1,
                dragging: false
            }))
        );

        dashboard.add(WidgetKind::SnakeGame).await;
        let mut received = vec![events.next().await.unwrap(), events.next().await.unwrap()];
        received.sort_by_key(|msg| matches!(msg, StreamMessage::Notification(_)));
        assert_eq!(
            received[0],
            StreamMessage::Layout {
                widgets: dashboard.order().clone()
            }
        );
        assert!(
            matches!(&received[1], StreamMessage::Notification(note) if note.title == "Widget added")
        );
    }

    #[test]
    fn test_chunks_are_tagged_json_lines() {
        let chunk = serialize_chunk(StreamMessage::Notification(Notification::dashboard_refreshed()))
            .unwrap();
        assert_eq!(chunk.last(), Some(&b'\n'));

        let value: serde_json::Value = serde_json::from_slice(&chunk).unwrap();
        assert_eq!(value["type"], "notification");
        assert_eq!(value["title"], "Dashboard refreshed");

        let chunk = serialize_chunk(StreamMessage::Layout {
            widgets: LayoutOrder::from_kinds(&[WidgetKind::CryptoNews]),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&chunk).unwrap();
        assert_eq!(value["type"], "layout");
        assert_eq!(value["widgets"], serde_json::json!(["CryptoNews"]));

        let chunk = serialize_chunk(StreamMessage::Grid(GridState {
            columns: 2,
            dragging: true,
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&chunk).unwrap();
        assert_eq!(value["type"], "grid");
        assert_eq!(value["columns"], 2);
        assert_eq!(value["dragging"], true);
    }
}
