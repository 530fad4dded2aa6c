use minijinja::{context, Value};
use uuid::Uuid;

use super::engine::LocatedView;

/// Placeholder for the request a view would normally render inside.
///
/// Carries no headers, route values or action metadata. The id only
/// correlates log lines for one render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    id: Uuid,
}

impl RenderRequest {
    pub fn synthetic() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Everything a view needs to execute: the request, the view and its data
#[derive(Debug)]
pub struct ViewContext<'a> {
    pub request: &'a RenderRequest,
    pub view: &'a LocatedView,
    pub view_data: Value,
}

impl<'a> ViewContext<'a> {
    pub fn new(request: &'a RenderRequest, view: &'a LocatedView, view_data: Value) -> Self {
        Self {
            request,
            view,
            view_data,
        }
    }

    pub(crate) fn template_context(&self) -> Value {
        context! { model => self.view_data.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::LookupStrategy;

    #[test]
    fn test_synthetic_requests_are_distinct() {
        let a = RenderRequest::synthetic();
        let b = RenderRequest::synthetic();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_template_context_binds_model() {
        let request = RenderRequest::synthetic();
        let view = LocatedView {
            path: "Templates/Mail.html".to_string(),
            strategy: LookupStrategy::DirectPath,
        };
        let ctx = ViewContext::new(&request, &view, Value::from("payload"));

        let bound = ctx.template_context();
        assert_eq!(bound.get_attr("model").unwrap(), Value::from("payload"));
        // request state is never exposed to the template
        assert!(bound.get_attr("request").unwrap().is_undefined());
    }
}
