// Dashboard error taxonomy
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A persisted or requested id has no registry entry.
    #[error("unknown dashboard widget '{0}'")]
    UnknownWidget(String),
    #[error("position {index} is out of range for a layout of {len} widgets")]
    OutOfRange { index: usize, len: usize },
    #[error("widget '{0}' is not on the dashboard")]
    NotOnDashboard(String),
}
