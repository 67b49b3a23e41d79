//! API error type with IntoResponse
//!
//! Every failure is reported as 400 with a JSON body. The `error` field
//! names the underlying kind for diagnostics; callers must not rely on
//! anything but the status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Store rejected or failed the operation
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Body could not be coerced into an entry
    #[error("invalid body: {message}")]
    InvalidBody { message: String },

    /// Missing or malformed request parameter
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_error",
            Self::InvalidBody { .. } => "invalid_body",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let message = match &self {
            Self::Store(e) => {
                tracing::warn!("Store error: {}", e);
                e.to_string()
            }
            Self::InvalidBody { message } | Self::InvalidRequest { message } => {
                tracing::debug!("Rejected request: {}", message);
                message.clone()
            }
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn store_error_is_400() {
        let err = ApiError::from(StoreError::DuplicateKey { id: "abc".into() });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "store_error");
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn invalid_body_is_400() {
        let response = ApiError::invalid_body("expected a string").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid_body");
        assert_eq!(body["message"], "expected a string");
    }

    #[tokio::test]
    async fn invalid_request_is_400() {
        let response = ApiError::invalid_request("missing id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
