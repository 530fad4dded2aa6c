//! Email template rendering outside of a request pipeline.
//!
//! This module provides:
//! - A service registry that wires a file provider, hosting environment and
//!   view engine options around a template root directory
//! - A view engine with two lookup strategies (direct path, then search path)
//! - A render invoker that binds a model into the located template and
//!   captures the output as a `String`
//!
//! # Example
//!
//! ```ignore
//! let registry = ServiceRegistry::initialize(RegistryOptions::with_root("./"))?;
//! let renderer = ViewRenderer::new(registry);
//!
//! let html = renderer.render_view_to_string(
//!     "Templates/EmailTemplate.html",
//!     &EmailViewModel::sample(),
//! )?;
//! ```

mod context;
mod engine;
mod file_provider;
mod model;
mod registry;
mod renderer;
mod report;
mod service;

use thiserror::Error;

pub use context::{RenderRequest, ViewContext};
pub use engine::{LocatedView, LookupStrategy, ViewEngine, ViewEngineResult};
pub use file_provider::PhysicalFileProvider;
pub use model::EmailViewModel;
pub use registry::{
    HostingEnvironment, RegistryOptions, RenderScope, ServiceRegistry, ViewEngineOptions,
    DEFAULT_EXTENSION, DEFAULT_VIEW_LOCATIONS,
};
pub use renderer::ViewRenderer;
pub use report::EmailReportGenerator;
pub use service::{render_view, EmailTemplateService};

/// Errors raised while bootstrapping the service registry
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Unable to determine application name: {0}")]
    ApplicationName(#[source] std::io::Error),

    #[error("Unable to determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("{}", not_found_message(.view, .searched))]
    ViewNotFound { view: String, searched: Vec<String> },

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

fn not_found_message(view: &str, searched: &[String]) -> String {
    let mut lines = Vec::with_capacity(searched.len() + 1);
    lines.push(format!(
        "Unable to find view '{}'. The following locations were searched:",
        view
    ));
    lines.extend(searched.iter().cloned());
    lines.join("\n")
}
