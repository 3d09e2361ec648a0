// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_error;
pub mod memory_store;
