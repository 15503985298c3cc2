use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    /// The health probe failed, nothing was uploaded.
    #[error("Linksnapper is not available at {url}: {cause}")]
    ServiceUnavailable { url: String, cause: String },
    #[error("rejected with status {0}")]
    Rejected(StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
