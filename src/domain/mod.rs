// Domain layer - Pure dashboard types and rules
pub mod dashboard;
pub mod error;
pub mod expansion;
pub mod layout;
pub mod notification;
pub mod registry;
pub mod viewport;
pub mod widget;
