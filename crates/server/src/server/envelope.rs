use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use screentime_core::SignatureData;

use crate::error::ServerError;

/// Extracts the `timestamp` / `signature` query pair carried by every signed
/// request. A missing or undecodable envelope is a bad request, not an
/// authorization failure.
pub struct Envelope(pub SignatureData);

impl<S> FromRequestParts<S> for Envelope
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(envelope) = Query::<SignatureData>::from_request_parts(parts, state)
            .await
            .map_err(|err| ServerError::BadRequest(err.body_text()))?;
        Ok(Self(envelope))
    }
}
