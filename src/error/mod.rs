use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request path: {0}")]
    InvalidPath(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidPath(_) => "INVALID_PATH",
            AppError::Template(TemplateError::ViewNotFound { .. }) => "VIEW_NOT_FOUND",
            AppError::Template(TemplateError::Bootstrap(_)) => "BOOTSTRAP_ERROR",
            AppError::Template(TemplateError::Read { .. }) => "READ_ERROR",
            AppError::Template(TemplateError::Render(_)) => "RENDER_ERROR",
            AppError::Template(TemplateError::Join(_)) => "INTERNAL_ERROR",
        }
    }

    /// Build the error response, masking the message in production
    fn to_response(&self, production: bool) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let code = self.code();
        let log_message = self.to_string();
        let client_message = if production {
            "Internal server error".to_string()
        } else {
            log_message.clone()
        };

        // Always log the detailed error server-side
        tracing::error!(
            code = %code,
            status = %status.as_u16(),
            message = %log_message,
            "Render request failed"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Every failure is an unhandled server error; the code tells them apart.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response(is_production())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn not_found() -> AppError {
        AppError::from(TemplateError::ViewNotFound {
            view: "Missing".to_string(),
            searched: vec!["Templates/Missing.html".to_string()],
        })
    }

    #[test]
    fn test_not_found_is_server_error() {
        let err = AppError::from(TemplateError::ViewNotFound {
            view: "Templates/Missing.html".to_string(),
            searched: vec!["Templates/Missing.html".to_string()],
        });
        assert_eq!(err.code(), "VIEW_NOT_FOUND");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_render_error_code() {
        let err = AppError::from(TemplateError::Render(minijinja::Error::new(
            minijinja::ErrorKind::SyntaxError,
            "unexpected end of input",
        )));
        assert_eq!(err.code(), "RENDER_ERROR");
    }

    #[test]
    fn test_read_error_code() {
        let err = AppError::from(TemplateError::Read {
            path: "Templates/Bad.html".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid utf-8"),
        });
        assert_eq!(err.code(), "READ_ERROR");
        assert!(err.to_string().contains("Templates/Bad.html"));
    }

    #[test]
    fn test_invalid_path_code() {
        let err = AppError::from(std::str::from_utf8(&[0xff]).unwrap_err());
        assert_eq!(err.code(), "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_production_masks_message() {
        let json = body_json(not_found().to_response(true)).await;

        assert_eq!(json["error"]["code"], "VIEW_NOT_FOUND");
        assert_eq!(json["error"]["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_development_shows_searched_locations() {
        let json = body_json(not_found().to_response(false)).await;

        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Unable to find view 'Missing'."));
        assert!(message.contains("Templates/Missing.html"));
    }
}
