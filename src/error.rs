use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::metrics;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request fields
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Underlying query/transaction error (preserves sqlx::Error for logging)
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    /// Budget save exceeded the configured transaction timeout
    #[error("budget save timed out after {0:?}")]
    SaveTimeout(std::time::Duration),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Raw storage errors stay in the server logs; clients get a
        // sanitized message.
        let (status, error_message) = match &self {
            Self::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Storage(err) => {
                tracing::error!(error = %err, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno de almacenamiento".to_string(),
                )
            }
            Self::SaveTimeout(timeout) => {
                tracing::error!(timeout = ?timeout, "Budget save timed out");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error guardando presupuesto".to_string(),
                )
            }
        };

        metrics::record_error(error_type_name(&self));

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidInput(_) => "invalid_input",
        AppError::Storage(_) => "storage_error",
        AppError::SaveTimeout(_) => "save_timeout",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidInput("missing field `area_m2`".to_string());
        assert_eq!(error.to_string(), "invalid input: missing field `area_m2`");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(
            error_type_name(&AppError::InvalidInput("test".to_string())),
            "invalid_input"
        );
        assert_eq!(
            error_type_name(&AppError::Storage(sqlx::Error::RowNotFound)),
            "storage_error"
        );
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_400() {
        let error = AppError::InvalidInput("missing field `pisos`".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_500_with_sanitized_body() {
        let error = AppError::Storage(sqlx::Error::RowNotFound);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("RowNotFound"));
    }

    #[tokio::test]
    async fn test_save_timeout_maps_to_500() {
        let error = AppError::SaveTimeout(std::time::Duration::from_secs(30));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
