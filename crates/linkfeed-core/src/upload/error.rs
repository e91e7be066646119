//! Upload transport error type.

use thiserror::Error;

/// The upload never produced an HTTP reply (connection refused, timeout,
/// malformed endpoint, multipart assembly failure).
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    #[error("multipart form: {0}")]
    Form(#[from] curl::FormError),
}
