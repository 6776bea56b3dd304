use thiserror::Error;

/// Errors from the OMDb client.
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("parse error: {0}")]
    Parse(String),
}
