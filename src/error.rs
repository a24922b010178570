// Errors returned by a collect call

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    /// Connection, DNS, TLS or timeout failure from the HTTP client.
    #[error("metrics API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("metrics API returned HTTP {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Body was not JSON or did not have the expected shape.
    /// Missing fields are not errors; they decode to zero.
    #[error("invalid metrics API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CollectError {
    /// HTTP status carried by `UnexpectedStatus`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CollectError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
