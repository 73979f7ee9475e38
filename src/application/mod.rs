// Application layer - Stores, controllers and the dashboard composer
pub mod dashboard_service;
pub mod drag_controller;
pub mod durable_storage;
pub mod expansion_store;
pub mod layout_store;
pub mod refresh_controller;

#[cfg(test)]
pub mod test_support;
