//! Non-CCIP error taxonomy and its `IntoResponse` mapping.
//!
//! Follows `src/handlers.rs`'s `impl IntoResponse for FacilitatorLocalError`
//! shape from the teacher: one enum, one `match` building the status code
//! and JSON envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ens_directory::{DirectoryError, RegistrarError};

use crate::http::auth::AuthError;
use crate::http::model::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Registrar(#[from] RegistrarError),
    #[error("invalid request: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, description) = match &self {
            AppError::Auth(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Directory(DirectoryError::NameNotFound) => {
                (StatusCode::NOT_FOUND, "name not found".to_string())
            }
            AppError::Directory(DirectoryError::AddressNotFound) => {
                (StatusCode::NOT_FOUND, "address not found".to_string())
            }
            AppError::Directory(DirectoryError::Duplicate) => {
                (StatusCode::CONFLICT, "name already registered".to_string())
            }
            AppError::Directory(DirectoryError::Backend(detail)) => {
                tracing::error!(error = %detail, "directory backend failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Registrar(RegistrarError::InvalidSubdomain) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Registrar(RegistrarError::AutoAliasExhausted) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::Registrar(RegistrarError::Directory(inner)) => {
                return AppError::Directory(inner.clone()).into_response();
            }
        };
        (status, Json(ApiResponse::<()>::err(description))).into_response()
    }
}
