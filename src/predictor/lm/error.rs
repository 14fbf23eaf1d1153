use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmError {
    #[error("api call failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("api returned no choices")]
    EmptyResponse,

    #[error("api returned malformed payload: {reason}")]
    MalformedResponse { reason: String },
}
