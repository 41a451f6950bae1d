mod basic_classification_evaluator;
mod performance_evaluator;

pub use basic_classification_evaluator::{BasicClassificationEvaluator, ReportDetail};
pub use performance_evaluator::{PerformanceEvaluator, PerformanceEvaluatorExt};
