//! Request extractors

use std::convert::Infallible;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use shared::AppError;
use validator::Validate;

use crate::core::ServerState;
use crate::db::DbService;

/// Store handle scoped to one request
///
/// The request window (`REQUEST_TIMEOUT_MS`) starts when the handler's
/// arguments are extracted; all store calls of the handler share it.
#[derive(Debug, Clone)]
pub struct RequestDb(pub DbService);

impl FromRequestParts<ServerState> for RequestDb {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.db.for_request()))
    }
}

/// JSON body that is deserialized and validated
///
/// Malformed bodies and failed validators both become
/// [`AppError::Validation`] (400) with the `{"error": ...}` body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
