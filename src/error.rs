//! Error types shared by the render and upload clients.

/// Failure of a call to the render API or the upload service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, broken pipe, ...)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {detail}")]
    Status {
        status: u16,
        /// `detail` field of the error body, or `Unknown error`
        detail: String,
    },

    /// The response body was not the expected JSON
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local file could not be read before upload
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configured base URL cannot carry a path
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Human-readable reason used in status lines.
    ///
    /// For rejected requests this is the server's `detail`, otherwise the
    /// error's display text.
    pub fn reason(&self) -> String {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// True if the server was reached and refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
