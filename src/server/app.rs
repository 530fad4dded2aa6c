use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::render_template;

use super::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Every path renders the template of the same name
        .fallback(render_template)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
