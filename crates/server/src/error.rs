use axum::http::StatusCode;
use axum_core::response::{IntoResponse as AxumCoreIntoResponse, Response};
use screentime_core::{KeyType, NOT_RECORDED_HEADER};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Signature does not match any authorized key")]
    InvalidSignature,
    #[error("Signature timestamp is outside the replay window")]
    OutdatedSignature,
    #[error("Role {role} is not allowed to {action}")]
    Forbidden { role: KeyType, action: &'static str },
    #[error("Nothing recorded for {0}")]
    NotFound(String),
}

/// Trait implementation to convert this error into an axum http response
impl AxumCoreIntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            bad_request_error @ ServerError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, bad_request_error.to_string()).into_response()
            }
            unauthorized @ (ServerError::InvalidSignature | ServerError::OutdatedSignature) => {
                (StatusCode::UNAUTHORIZED, unauthorized.to_string()).into_response()
            }
            forbidden @ ServerError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, forbidden.to_string()).into_response()
            }
            not_found @ ServerError::NotFound(_) => {
                (
                    StatusCode::NOT_FOUND,
                    [(NOT_RECORDED_HEADER, "true")],
                    not_found.to_string(),
                )
                    .into_response()
            }
            ServerError::Unexpected(error) => {
                tracing::error!(error = %error, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something wrong happened.",
                )
                    .into_response()
            }
        }
    }
}
