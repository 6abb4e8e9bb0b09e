use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::listing::FetchError;
use crate::llm_client::LlmError;
use crate::proposal::composer::ComposeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ComposeError> for AppError {
    fn from(e: ComposeError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    format!("Erro ao gerar a proposta: {e}. Verifique sua chave API e tente novamente."),
                )
            }
            AppError::Fetch(e) => {
                tracing::warn!("Listing fetch error: {e}");
                let (status, code) = match e {
                    FetchError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "INVALID_URL"),
                    FetchError::ForeignSite { .. } => (StatusCode::BAD_REQUEST, "FOREIGN_SITE"),
                    FetchError::Status(_) | FetchError::Transport(_) => {
                        (StatusCode::BAD_GATEWAY, "FETCH_ERROR")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("Campo obrigatório ausente: value".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_foreign_site_maps_to_bad_request() {
        let err = FetchError::ForeignSite {
            host: "example.com".into(),
            expected: "99freelas.com.br".into(),
        };
        assert_eq!(AppError::from(err).into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_maps_to_bad_gateway() {
        let response = AppError::from(FetchError::Status(503)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::from(LlmError::EmptyContent).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
