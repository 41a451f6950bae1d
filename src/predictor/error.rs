use crate::core::VocabularyError;
use thiserror::Error;

/// Structural failures of a prediction call. Bad individual feature values
/// never end up here; they are replaced by training means.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("expected {expected} features, got {found}")]
    FeatureCount { found: usize, expected: usize },

    #[error("no model available: {0}")]
    ModelUnavailable(String),

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}
