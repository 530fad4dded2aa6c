use std::error::Error as _;
use std::io;

use minijinja::{Environment, ErrorKind};

use super::context::ViewContext;
use super::file_provider::{trim_root, PhysicalFileProvider};
use super::registry::ViewEngineOptions;
use super::{TemplateError, TemplateResult};

/// Which lookup located a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// The reference was used as a path relative to the root
    DirectPath,
    /// The reference was expanded through the view location formats
    SearchPath,
}

/// A template the engine can execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedView {
    /// Root-relative path, also the engine's template name
    pub path: String,
    pub strategy: LookupStrategy,
}

/// Outcome of a single lookup strategy
#[derive(Debug, Clone)]
pub struct ViewEngineResult {
    pub view_name: String,
    pub view: Option<LocatedView>,
    pub searched_locations: Vec<String>,
}

impl ViewEngineResult {
    fn found(view_name: &str, view: LocatedView, searched_locations: Vec<String>) -> Self {
        Self {
            view_name: view_name.to_string(),
            view: Some(view),
            searched_locations,
        }
    }

    fn not_found(view_name: &str, searched_locations: Vec<String>) -> Self {
        Self {
            view_name: view_name.to_string(),
            view: None,
            searched_locations,
        }
    }

    pub fn is_success(&self) -> bool {
        self.view.is_some()
    }
}

/// View lookup and execution over a registry's file provider.
///
/// Borrowed from a [`RenderScope`](super::RenderScope) for the duration of a
/// single render.
pub struct ViewEngine<'a> {
    file_provider: &'a PhysicalFileProvider,
    options: &'a ViewEngineOptions,
    env: &'a Environment<'static>,
}

impl<'a> ViewEngine<'a> {
    pub(crate) fn new(
        file_provider: &'a PhysicalFileProvider,
        options: &'a ViewEngineOptions,
        env: &'a Environment<'static>,
    ) -> Self {
        Self {
            file_provider,
            options,
            env,
        }
    }

    /// Look the view up as a path relative to the root.
    pub fn get_view(&self, view_path: &str) -> ViewEngineResult {
        let path = trim_root(view_path);

        if self.file_provider.exists(path) {
            let view = LocatedView {
                path: path.to_string(),
                strategy: LookupStrategy::DirectPath,
            };
            return ViewEngineResult::found(view_path, view, vec![]);
        }

        ViewEngineResult::not_found(view_path, vec![path.to_string()])
    }

    /// Look the view up by name through the configured location formats.
    ///
    /// The name has its extension stripped, is substituted for `{0}` in each
    /// format in order, and the extension is appended again. The first
    /// existing candidate wins.
    pub fn find_view(&self, view_name: &str) -> ViewEngineResult {
        let name = self.logical_name(view_name);
        let mut searched = Vec::with_capacity(self.options.view_location_formats.len());

        for format in &self.options.view_location_formats {
            let candidate = format!(
                "{}.{}",
                trim_root(&format.replace("{0}", name)),
                self.options.extension
            );

            if self.file_provider.exists(&candidate) {
                let view = LocatedView {
                    path: candidate,
                    strategy: LookupStrategy::SearchPath,
                };
                return ViewEngineResult::found(view_name, view, searched);
            }

            tracing::debug!(view = %view_name, location = %candidate, "View not at location");
            searched.push(candidate);
        }

        ViewEngineResult::not_found(view_name, searched)
    }

    /// Execute a located view with the context's model bound as `model`.
    ///
    /// A located file the loader cannot read fails with
    /// [`TemplateError::Read`] naming the file.
    pub fn render(&self, context: &ViewContext<'_>) -> TemplateResult<String> {
        let path = &context.view.path;
        let template = self
            .env
            .get_template(path)
            .map_err(|err| load_error(path, err))?;
        Ok(template.render(context.template_context())?)
    }

    fn logical_name<'n>(&self, view_name: &'n str) -> &'n str {
        let name = trim_root(view_name);
        name.strip_suffix(self.options.extension.as_str())
            .and_then(|stem| stem.strip_suffix('.'))
            .unwrap_or(name)
    }
}

fn load_error(path: &str, err: minijinja::Error) -> TemplateError {
    if err.kind() != ErrorKind::InvalidOperation {
        return TemplateError::Render(err);
    }

    let io_source = err
        .source()
        .and_then(|source| source.downcast_ref::<io::Error>())
        .map(|source| io::Error::new(source.kind(), source.to_string()));

    match io_source {
        Some(source) => TemplateError::Read {
            path: path.to_string(),
            source,
        },
        None => TemplateError::Render(err),
    }
}
