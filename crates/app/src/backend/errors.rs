//! Backend errors.

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response or an unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
