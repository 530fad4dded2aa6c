use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::{path_loader, Environment};

use super::context::RenderRequest;
use super::engine::ViewEngine;
use super::file_provider::PhysicalFileProvider;
use super::report::EmailReportGenerator;
use super::BootstrapError;

/// File extension of template files
pub const DEFAULT_EXTENSION: &str = "html";

/// Location formats the search-path lookup expands, `{0}` is the view name
pub const DEFAULT_VIEW_LOCATIONS: &[&str] = &[
    "Templates/{0}",
    "Templates/Shared/{0}",
    "Templates/Layouts/{0}",
];

/// Inputs for [`ServiceRegistry::initialize`]
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Template root; the working directory when unset
    pub root: Option<PathBuf>,
    pub extension: String,
    pub view_locations: Vec<String>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            root: None,
            extension: DEFAULT_EXTENSION.to_string(),
            view_locations: DEFAULT_VIEW_LOCATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RegistryOptions {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }
}

/// Describes the application the templates belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingEnvironment {
    pub application_name: String,
    pub content_root: PathBuf,
}

/// Where the view engine looks for templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEngineOptions {
    pub extension: String,
    pub view_location_formats: Vec<String>,
}

/// The services a render needs, built once per session and shared read-only.
pub struct ServiceRegistry {
    hosting: HostingEnvironment,
    file_provider: PhysicalFileProvider,
    view_options: ViewEngineOptions,
    env: Environment<'static>,
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("hosting", &self.hosting)
            .field("file_provider", &self.file_provider)
            .field("view_options", &self.view_options)
            .finish_non_exhaustive()
    }
}

impl ServiceRegistry {
    /// Build the registry.
    ///
    /// With a root override the application is named after the root
    /// directory. Without one the root is the working directory and the
    /// application is named after the running executable.
    pub fn initialize(options: RegistryOptions) -> Result<Arc<Self>, BootstrapError> {
        let (application_name, root) = match options.root {
            Some(root) => {
                let name = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string());
                (name, root)
            }
            None => {
                let root = std::env::current_dir().map_err(BootstrapError::WorkingDirectory)?;
                (executable_name()?, root)
            }
        };

        let file_provider = PhysicalFileProvider::new(root.clone());
        let hosting = HostingEnvironment {
            application_name,
            content_root: root,
        };
        let view_options = ViewEngineOptions {
            extension: options.extension,
            view_location_formats: options.view_locations,
        };
        let env = build_environment(&hosting.content_root);

        tracing::info!(
            application = %hosting.application_name,
            root = %hosting.content_root.display(),
            extension = %view_options.extension,
            "Template services initialized"
        );

        Ok(Arc::new(Self {
            hosting,
            file_provider,
            view_options,
            env,
        }))
    }

    pub fn hosting(&self) -> &HostingEnvironment {
        &self.hosting
    }

    pub fn file_provider(&self) -> &PhysicalFileProvider {
        &self.file_provider
    }

    pub fn view_options(&self) -> &ViewEngineOptions {
        &self.view_options
    }

    /// Open a unit of work for a single render
    pub fn create_scope(&self) -> RenderScope<'_> {
        RenderScope {
            registry: self,
            request: RenderRequest::synthetic(),
        }
    }
}

/// Per-render view of the registry, dropped when the render completes
#[derive(Debug)]
pub struct RenderScope<'a> {
    registry: &'a ServiceRegistry,
    request: RenderRequest,
}

impl<'a> RenderScope<'a> {
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn view_engine(&self) -> ViewEngine<'a> {
        ViewEngine::new(
            &self.registry.file_provider,
            &self.registry.view_options,
            &self.registry.env,
        )
    }
}

impl Drop for RenderScope<'_> {
    fn drop(&mut self) {
        tracing::trace!(request_id = %self.request.id(), "Render scope released");
    }
}

fn build_environment(root: &Path) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(path_loader(root));

    let reports = EmailReportGenerator;
    env.add_function("generate_report", move |user_data1: i64, user_data2: i64| {
        reports.generate_report(user_data1, user_data2)
    });

    env
}

fn executable_name() -> Result<String, BootstrapError> {
    let exe = std::env::current_exe().map_err(BootstrapError::ApplicationName)?;
    exe.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BootstrapError::ApplicationName(io::Error::other(format!(
                "executable path has no file name: {}",
                exe.display()
            )))
        })
}
