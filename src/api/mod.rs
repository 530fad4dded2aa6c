//! API layer - HTTP endpoint handlers.

mod render;

pub use render::{render_template, template_path_for};
