mod estimators;
mod evaluators;
pub mod holdout;
mod measurement;
pub mod preview;
pub mod probes;

pub use estimators::{Estimator, WeightedMean};
pub use evaluators::{
    BasicClassificationEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt, ReportDetail,
};
pub use holdout::{accuracy, evaluate_holdout};
pub use measurement::Measurement;
pub use preview::{CurveFormat, LearningCurve, StageSnapshot};
pub use probes::{CleanProbe, NoisyLabelProbe, TrainingAccuracyProbe};
