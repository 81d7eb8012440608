use reqwest::StatusCode;
use screentime_core::AuthError;

/// Errors that can occur when talking to the screen time service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nothing recorded for the requested week")]
    NotRecorded,
    #[error("invalid service URL: {0}")]
    Url(String),
    #[error("invalid HTTP method: {0}")]
    Method(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::NotRecorded => Some(StatusCode::NOT_FOUND),
            ClientError::Transport(error) => error.status(),
            _ => None,
        }
    }
}
