use crate::classifiers::Classifier;
use crate::core::instances::DenseInstance;
use crate::evaluation::{
    BasicClassificationEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt, WeightedMean,
};

/// Feeds every `(row, label)` pair and the model's votes to `evaluator`.
///
/// A model without votes (no trees yet) scores an all-zero vote vector,
/// which the evaluator reads as a prediction of class 0.
pub fn evaluate_holdout<C, P>(model: &C, rows: &[Vec<f64>], labels: &[usize], evaluator: &mut P)
where
    C: Classifier + ?Sized,
    P: PerformanceEvaluator + ?Sized,
{
    for (row, &label) in rows.iter().zip(labels) {
        let instance = DenseInstance::labelled(row.clone(), label);
        let votes = model
            .get_votes_for_instance(&instance)
            .unwrap_or_else(|| vec![0.0; model.number_of_classes()]);
        evaluator.add_result(&instance, votes);
    }
}

/// Fraction of rows predicted correctly; NaN when there are no rows.
pub fn accuracy<C: Classifier + ?Sized>(model: &C, rows: &[Vec<f64>], labels: &[usize]) -> f64 {
    let mut evaluator =
        BasicClassificationEvaluator::<WeightedMean>::accuracy_only(model.number_of_classes());
    evaluate_holdout(model, rows, labels, &mut evaluator);
    evaluator.metric("accuracy").unwrap_or(f64::NAN)
}
