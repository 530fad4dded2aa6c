//! Path-to-template preview endpoint.

use axum::{extract::State, http::Uri};
use percent_encoding::percent_decode_str;

use crate::error::Result;
use crate::server::AppState;
use crate::template::EmailTemplateService;

/// Map a request path to its template, `/Welcome` -> `Templates/Welcome.html`
pub fn template_path_for(request_path: &str, extension: &str) -> String {
    format!("Templates{}.{}", request_path, extension)
}

/// Any path - Render the template of the same name
///
/// A fresh service is built for every request; nothing is cached.
#[tracing::instrument(name = "http.render_template", skip(state, uri), fields(path = %uri.path()))]
pub async fn render_template(State(state): State<AppState>, uri: Uri) -> Result<String> {
    let options = state.registry_options();
    let request_path = percent_decode_str(uri.path()).decode_utf8()?;
    let view = template_path_for(&request_path, &options.extension);

    let service = EmailTemplateService::with_options(options)?;
    let body = service.render_view(&view).await?;

    Ok(body)
}
