// HTTP mapping for canvas errors
use crate::application::canvas_service::CanvasError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl CanvasError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CanvasError::DashboardNotFound(_) | CanvasError::ComponentNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            CanvasError::InvalidSize { .. } | CanvasError::InvalidGrid => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CanvasError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CanvasError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CanvasError::DashboardNotFound("d1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CanvasError::InvalidSize { width: 0, height: 10 }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CanvasError::Store(anyhow::anyhow!("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
