use std::path::PathBuf;
use std::sync::Arc;

use super::model::EmailViewModel;
use super::registry::{RegistryOptions, ServiceRegistry};
use super::renderer::ViewRenderer;
use super::TemplateResult;

/// Self-contained email renderer owning its own service registry.
///
/// Renders with [`EmailViewModel::sample_with_title`]; the title is `"a"`.
#[derive(Debug, Clone)]
pub struct EmailTemplateService {
    registry: Arc<ServiceRegistry>,
}

impl EmailTemplateService {
    pub fn new(root: Option<PathBuf>) -> TemplateResult<Self> {
        Self::with_options(RegistryOptions {
            root,
            ..RegistryOptions::default()
        })
    }

    pub fn with_options(options: RegistryOptions) -> TemplateResult<Self> {
        let registry = ServiceRegistry::initialize(options)?;
        Ok(Self { registry })
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    pub async fn render_view(&self, path: &str) -> TemplateResult<String> {
        let model = EmailViewModel::sample_with_title("a");
        ViewRenderer::new(self.registry.clone())
            .render_view(path, &model)
            .await
    }

    /// Render `Templates/WelcomeMail`
    pub async fn render_default(&self) -> TemplateResult<String> {
        let path = format!(
            "Templates/WelcomeMail.{}",
            self.registry.view_options().extension
        );
        self.render_view(&path).await
    }
}

/// Render a view against a shared registry with the untitled sample model.
pub async fn render_view(registry: &Arc<ServiceRegistry>, view: &str) -> TemplateResult<String> {
    ViewRenderer::new(registry.clone())
        .render_view(view, &EmailViewModel::sample())
        .await
}
