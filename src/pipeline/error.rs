use crate::core::VocabularyError;
use crate::data::DataError;
use crate::pipeline::config::ConfigError;
use crate::preprocessing::ScalerError;
use thiserror::Error;

/// Reasons a fit pass produced no model. None of them is retried.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("configuration error: {0}")]
    Configuration(#[from] DataError),

    #[error("label '{0}' is not in the training vocabulary")]
    UnseenLabel(String),

    #[error(transparent)]
    Vocabulary(VocabularyError),

    #[error(transparent)]
    Scaler(#[from] ScalerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid tree stages: {0}")]
    Stages(#[source] std::io::Error),
}

impl From<VocabularyError> for FitError {
    fn from(err: VocabularyError) -> Self {
        match err {
            VocabularyError::UnseenLabel(label) => FitError::UnseenLabel(label),
            other => FitError::Vocabulary(other),
        }
    }
}
