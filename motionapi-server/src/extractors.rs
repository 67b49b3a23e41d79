//! Custom Axum extractors
//!
//! Both reject with `ApiError` so malformed requests get the same 400 shape
//! as store failures.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;

/// JSON body with the rejection mapped to `ApiError::InvalidBody`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        Ok(Self(value))
    }
}

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// Entry identifier from the path (`/{id}`) or the query string (`?id=`).
///
/// The value is passed through as-is; a malformed id simply matches nothing.
pub struct EntryId(pub String);

impl<S> FromRequestParts<S> for EntryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(id)) = Path::<String>::from_request_parts(parts, state).await {
            return Ok(Self(id));
        }

        let Query(query) = Query::<IdQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.body_text()))?;

        query
            .id
            .map(Self)
            .ok_or_else(|| ApiError::invalid_request("missing entry id"))
    }
}
