// Application state for HTTP handlers
use crate::application::dashboard_service::Dashboard;
use crate::application::refresh_controller::RefreshController;
use crate::infrastructure::notifier::BroadcastNotifier;
use tokio::sync::Mutex;

/// The mutex serializes gestures so layout mutations apply in dispatch order.
pub struct AppState {
    pub dashboard: Mutex<Dashboard>,
    pub refresh: RefreshController,
    pub notifier: BroadcastNotifier,
}
