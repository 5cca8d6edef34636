//! The contract every translation service implements.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a backend call can produce.
///
/// None of these ever escape the cell translator: they are logged and the
/// cell falls back to its original text.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("API responded with {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Body or message returned by the service
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The call succeeded but carried no translation.
    #[error("response contained no translations")]
    EmptyResult,

    /// The call did not finish within the per-call deadline.
    #[error("timed out after {0:.1}s")]
    Timeout(f64),
}

/// A text-in/text-out translation service.
///
/// Implementations receive a single source text and return zero or more
/// candidate translations. Callers only ever look at the first one.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Vec<String>, BackendError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Vec<String>, BackendError> {
        (**self).translate(text, target_language).await
    }
}
