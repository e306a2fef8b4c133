//! Extractors whose rejections use the API's `{"error": {...}}` body.

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Path` with malformed ids reported as `BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `Json` with content-type and syntax errors reported as `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// A JSON body that may be left out entirely. An empty body is `None`; any
/// other body must be valid JSON for `T`.
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let mut buffered = Request::new(Body::from(bytes));
        *buffered.headers_mut() = headers;
        let ApiJson(value) = ApiJson::<T>::from_request(buffered, state).await?;
        Ok(Self(Some(value)))
    }
}
