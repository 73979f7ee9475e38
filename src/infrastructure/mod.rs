// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod event_stream;
pub mod file_storage;
pub mod http_response;
pub mod memory_storage;
pub mod notifier;
