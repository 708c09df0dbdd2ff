//! Application error type mapping to HTTP status codes.
//!
//! The body shape is always `{"error": "<message>"}`, with fixed Spanish
//! messages chosen per route by the handlers. Store failures are logged
//! here with their source; the client only ever sees the generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use dungeonduel_types::error::StoreError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Referenced session does not exist (404).
    NotFound(&'static str),
    /// Persistence or processing failure (500).
    Internal(&'static str),
}

impl AppError {
    /// Map a store error to the route's client-visible messages.
    pub fn from_store(err: StoreError, not_found: &'static str, internal: &'static str) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(not_found),
            err => {
                tracing::error!(error = %err, "store operation failed");
                AppError::Internal(internal)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_not_found() {
        let err = AppError::from_store(StoreError::NotFound, "Partida no existe", "Error");
        assert!(matches!(err, AppError::NotFound("Partida no existe")));
    }

    #[test]
    fn test_from_store_persistence() {
        let err = AppError::from_store(
            StoreError::Persistence("disk full".to_string()),
            "Partida no existe",
            "Error procesando turno",
        );
        assert!(matches!(err, AppError::Internal("Error procesando turno")));
    }
}
