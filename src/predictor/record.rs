use crate::predictor::FeatureInput;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A served prediction, ready for whatever stores request history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub input: FeatureInput,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(input: FeatureInput, label: String) -> Self {
        Self {
            input,
            label,
            timestamp: Utc::now(),
        }
    }
}
