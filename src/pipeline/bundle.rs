use crate::classifiers::{ModelKind, RandomForest};
use crate::core::{FeatureSchema, LabelVocabulary, VocabularyError};
use crate::evaluation::{LearningCurve, Measurement};
use crate::pipeline::FitError;
use crate::preprocessing::FeatureStatistics;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum BundleOrigin {
    /// Fitted on the clinical dataset.
    Trained,
    /// Synthetic fallback; predictions carry no meaning.
    Dummy,
}

/// Everything one fit pass produces. Replaced as a whole, never patched.
pub struct ModelBundle {
    pub schema: FeatureSchema,
    pub vocabulary: LabelVocabulary,
    pub statistics: FeatureStatistics,
    pub forest: RandomForest,
    pub origin: BundleOrigin,
    pub test_accuracy: f64,
    pub trained_at: DateTime<Utc>,
}

impl ModelBundle {
    pub fn model_kind(&self) -> ModelKind {
        self.forest.kind()
    }

    /// Standardizes a complete, schema-ordered raw row and returns the
    /// predicted label.
    pub fn classify(&self, raw: &[f64]) -> Result<&str, VocabularyError> {
        debug_assert_eq!(raw.len(), self.schema.len());
        let scaled = self.statistics.scaler().transform_row(raw);
        let code = self.forest.predict_row(&scaled).unwrap_or(0);
        self.vocabulary.decode(code)
    }
}

/// Actual and predicted label of one test row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSample {
    pub actual: String,
    pub predicted: String,
}

/// Summary of a successful fit.
pub struct FitReport {
    pub bundle: Arc<ModelBundle>,
    pub test_accuracy: f64,
    pub curve: LearningCurve,
    pub stopped_at_stage: Option<usize>,
    pub oversampled: bool,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub test_rows: usize,
    /// Empty when no test table was available.
    pub test_measurements: Vec<Measurement>,
    /// Leading rows of the test table.
    pub test_samples: Vec<TestSample>,
    /// Schema features sorted by decreasing importance.
    pub feature_importances: Vec<(String, f64)>,
}

impl FitReport {
    pub fn top_features(&self, n: usize) -> &[(String, f64)] {
        &self.feature_importances[..n.min(self.feature_importances.len())]
    }
}

/// Outcome of one fit pass; the caller decides what replaces a failed fit.
pub enum FitResult {
    Success(Box<FitReport>),
    Failed(FitError),
}

impl FitResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FitResult::Success(_))
    }

    pub fn into_result(self) -> Result<FitReport, FitError> {
        match self {
            FitResult::Success(report) => Ok(*report),
            FitResult::Failed(err) => Err(err),
        }
    }
}

impl From<Result<FitReport, FitError>> for FitResult {
    fn from(result: Result<FitReport, FitError>) -> Self {
        match result {
            Ok(report) => FitResult::Success(Box::new(report)),
            Err(err) => FitResult::Failed(err),
        }
    }
}
