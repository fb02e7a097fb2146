use rspotify::http::HttpError;
use rspotify::ClientError;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("access token rejected")]
    Unauthorized,

    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid track id {0:?}")]
    InvalidId(String),
}

impl ApiError {
    /// Classify an unsuccessful HTTP status.
    pub fn from_status(status: u16, retry_after: Option<&str>, message: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            429 => Self::RateLimited {
                retry_after: retry_after
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs),
            },
            _ => Self::Status {
                status,
                message: message.to_string(),
            },
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidToken => Self::Unauthorized,
            ClientError::ParseJson(e) => Self::Malformed(e),
            ClientError::Http(http) => match *http {
                HttpError::StatusCode(resp) => {
                    Self::from_status(resp.status(), resp.header("Retry-After"), resp.status_text())
                }
                other => Self::Transport(other.to_string()),
            },
            other => Self::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),
}
