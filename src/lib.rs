// Rendering core
pub mod template;

// Supporting modules
pub mod config;
pub mod error;

// Live preview host
pub mod api;
pub mod server;
