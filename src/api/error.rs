use thiserror::Error;

/// Errors from the Imgflip endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("no Imgflip credentials configured")]
    MissingCredentials,
}
