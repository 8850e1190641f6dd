use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong talking to the backend. Nothing is retried;
/// callers either show the error or fall back to a safe default.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 401: the token is missing, expired or invalid.
    #[error("authentication required for {url}")]
    Unauthorized { url: String, body: String },

    /// 403: authenticated, but the backend refused the operation.
    #[error("permission denied for {url}")]
    Forbidden { url: String, body: String },

    /// 400 with the backend's field-level error payload.
    #[error("validation failed for {url}")]
    Validation { url: String, fields: Value },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected status {status} from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The request could not be assembled (bad multipart part, etc.).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(url: impl Into<String>, status: StatusCode, body: String) -> Self {
        let url = url.into();
        match status {
            StatusCode::BAD_REQUEST => {
                let fields = serde_json::from_str(&body).unwrap_or(Value::String(body));
                ApiError::Validation { url, fields }
            }
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { url, body },
            StatusCode::FORBIDDEN => ApiError::Forbidden { url, body },
            StatusCode::NOT_FOUND => ApiError::NotFound { url },
            _ => ApiError::Status { url, status, body },
        }
    }

    /// The HTTP status behind this error, when there was a response at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            ApiError::Validation { .. } => Some(StatusCode::BAD_REQUEST),
            ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status(),
            ApiError::Decode { .. } | ApiError::InvalidRequest(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Field-level validation messages, for inline display next to form inputs.
    pub fn field_errors(&self) -> Option<&Value> {
        match self {
            ApiError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}
