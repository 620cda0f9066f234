//! Client-side failures. These never leave the public client API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid stats server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request to stats server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("stats server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response from stats server: {0}")]
    Decode(reqwest::Error),
}
