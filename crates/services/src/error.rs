//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::CatalogError;

/// Errors emitted by the generative-model client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenAiError {
    #[error("DRILL_GENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("model request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by sentence sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SentenceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to generate sentence")]
    Generation(#[source] GenAiError),
}

/// Errors emitted by response validators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidateError {
    #[error("failed to validate response")]
    Remote(#[source] GenAiError),
    #[error("model verdict could not be parsed")]
    MalformedVerdict(#[source] serde_json::Error),
}
