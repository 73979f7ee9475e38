// User-facing notification
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub at_ms: i64,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn widget_added(title: &str) -> Self {
        Self::new("Widget added", format!("{title} has been added to your dashboard"))
    }

    pub fn widget_moved(title: &str, destination: usize) -> Self {
        Self::new(
            "Widget moved",
            format!("{title} moved to position {}", destination + 1),
        )
    }

    pub fn dashboard_refreshed() -> Self {
        Self::new("Dashboard refreshed", "All widgets have been updated")
    }
}
