use crate::errors::ApiError;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use http::request::Parts;
use log::debug;
use serde::de::DeserializeOwned;

/// JSON body extractor reporting malformed bodies in the error envelope
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(ApiError::new(rejection.body_text(), rejection.status()))
            }
        }
    }
}

/// The `{id}` path segment of a drink route.
///
/// Ids that are not integers cannot name a stored drink, so they are
/// reported as not found.
pub struct DrinkId(pub i64);

impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!("Rejected drink id: {}", rejection.body_text());
                Err(ApiError::not_found(format!(
                    "No drink of id {}",
                    raw_id(parts.uri.path())
                )))
            }
        }
    }
}

fn raw_id(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}
