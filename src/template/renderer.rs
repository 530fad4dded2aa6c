use std::sync::Arc;

use minijinja::Value;
use serde::Serialize;

use super::context::ViewContext;
use super::engine::{LocatedView, ViewEngine};
use super::registry::ServiceRegistry;
use super::{TemplateError, TemplateResult};

/// Renders a view with a model into a string.
///
/// Each call opens its own [`RenderScope`](super::RenderScope), so concurrent
/// renders share only the read-only registry.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    registry: Arc<ServiceRegistry>,
}

impl ViewRenderer {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Locate `view` and render it with `model` bound as `model`.
    ///
    /// The reference is tried as a direct path first and then through the
    /// search path. When both miss, the error lists every location searched.
    pub fn render_view_to_string<M>(&self, view: &str, model: &M) -> TemplateResult<String>
    where
        M: Serialize + ?Sized,
    {
        let scope = self.registry.create_scope();
        let request = scope.request();

        let span = tracing::info_span!("render_view", view = %view, request_id = %request.id());
        let _enter = span.enter();

        let engine = scope.view_engine();
        let located = locate_view(&engine, view)?;

        let context = ViewContext::new(request, &located, Value::from_serialize(model));
        let output = engine.render(&context)?;

        tracing::info!(
            path = %located.path,
            strategy = ?located.strategy,
            bytes = output.len(),
            "View rendered"
        );

        Ok(output)
    }

    /// Async form of [`render_view_to_string`](Self::render_view_to_string).
    ///
    /// Template execution runs on the blocking pool, inside the caller's span.
    pub async fn render_view<M>(&self, view: &str, model: &M) -> TemplateResult<String>
    where
        M: Serialize + ?Sized,
    {
        let renderer = self.clone();
        let view = view.to_string();
        let model = Value::from_serialize(model);
        let span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            span.in_scope(|| renderer.render_view_to_string(&view, &model))
        })
        .await?
    }
}

fn locate_view(engine: &ViewEngine<'_>, view: &str) -> TemplateResult<LocatedView> {
    let get_result = engine.get_view(view);
    if let Some(located) = get_result.view {
        return Ok(located);
    }

    let find_result = engine.find_view(view);
    if let Some(located) = find_result.view {
        return Ok(located);
    }

    let searched: Vec<String> = get_result
        .searched_locations
        .into_iter()
        .chain(find_result.searched_locations)
        .collect();

    tracing::debug!(view = %view, searched = searched.len(), "View not found");

    Err(TemplateError::ViewNotFound {
        view: view.to_string(),
        searched,
    })
}
