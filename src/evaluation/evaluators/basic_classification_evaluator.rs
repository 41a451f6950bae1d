use crate::classifiers::argmax;
use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// How much a [`BasicClassificationEvaluator`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportDetail {
    /// `accuracy` and `kappa`.
    Accuracy,
    /// Adds macro-averaged `precision`, `recall` and `f1`.
    Summary,
    /// Adds `precision_class_{c}`, `recall_class_{c}`, `f1_class_{c}` and
    /// `support_class_{c}` for every class code `c`.
    PerClass,
}

/// Classification metrics over a held-out partition with a fixed number
/// of classes.
///
/// Every estimate is weighted by instance weight. Cohen's κ compares the
/// observed accuracy with the agreement expected from the predicted and
/// true class marginals. Examples whose true or predicted code falls
/// outside `0..num_classes` are skipped.
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    num_classes: usize,
    detail: ReportDetail,
    correct: E,
    predicted_share: Vec<E>,
    true_share: Vec<E>,
    precision: Vec<E>,
    recall: Vec<E>,
    support: Vec<f64>,
}

fn harmonic_mean(p: f64, r: f64) -> f64 {
    let s = p + r;
    if !(p.is_finite() && r.is_finite()) {
        f64::NAN
    } else if s > f64::EPSILON {
        2.0 * p * r / s
    } else {
        0.0
    }
}

/// Mean of the finite values, NaN when there are none.
fn finite_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n > 0 { sum / n as f64 } else { f64::NAN }
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new(num_classes: usize, detail: ReportDetail) -> Self {
        let per_class = || (0..num_classes).map(|_| E::default()).collect::<Vec<_>>();
        Self {
            num_classes,
            detail,
            correct: E::default(),
            predicted_share: per_class(),
            true_share: per_class(),
            precision: per_class(),
            recall: per_class(),
            support: vec![0.0; num_classes],
        }
    }

    pub fn accuracy_only(num_classes: usize) -> Self {
        Self::new(num_classes, ReportDetail::Accuracy)
    }

    pub fn full_report(num_classes: usize) -> Self {
        Self::new(num_classes, ReportDetail::PerClass)
    }

    /// Total weight of evaluated examples per true class.
    pub fn class_support(&self) -> &[f64] {
        &self.support
    }

    fn kappa(&self) -> f64 {
        let p_o = self.correct.estimation();
        let p_e: f64 = self
            .predicted_share
            .iter()
            .zip(&self.true_share)
            .map(|(p, t)| p.estimation() * t.estimation())
            .filter(|v| v.is_finite())
            .sum();
        let denom = 1.0 - p_e;
        if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new(self.num_classes, self.detail);
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>) {
        let (Some(y), Some(yhat)) = (example.class_value(), argmax(&class_votes)) else {
            return;
        };
        if y >= self.num_classes || yhat >= self.num_classes {
            return;
        }
        let w = example.weight();
        if w.is_nan() || w <= 0.0 {
            return;
        }

        let hit = if yhat == y { 1.0 } else { 0.0 };
        self.correct.add_weighted(hit, w);
        for c in 0..self.num_classes {
            self.predicted_share[c].add_weighted(if c == yhat { 1.0 } else { 0.0 }, w);
            self.true_share[c].add_weighted(if c == y { 1.0 } else { 0.0 }, w);
        }
        self.precision[yhat].add_weighted(hit, w);
        self.recall[y].add_weighted(hit, w);
        self.support[y] += w;
    }

    fn performance(&self) -> Vec<Measurement> {
        let mut m = vec![Measurement::new("accuracy", self.correct.estimation())];
        let kappa = if self.correct.total_weight() > 0.0 {
            self.kappa()
        } else {
            0.0
        };
        m.push(Measurement::new("kappa", kappa));

        let precision: Vec<f64> = self.precision.iter().map(Estimator::estimation).collect();
        let recall: Vec<f64> = self.recall.iter().map(Estimator::estimation).collect();
        let f1: Vec<f64> = precision
            .iter()
            .zip(&recall)
            .map(|(&p, &r)| harmonic_mean(p, r))
            .collect();

        if self.detail >= ReportDetail::Summary {
            // Macro averages are unweighted means of the per-class scores.
            m.push(Measurement::new("precision", finite_mean(precision.iter().copied())));
            m.push(Measurement::new("recall", finite_mean(recall.iter().copied())));
            m.push(Measurement::new("f1", finite_mean(f1.iter().copied())));
        }

        if self.detail >= ReportDetail::PerClass {
            for c in 0..self.num_classes {
                m.push(Measurement::new(format!("precision_class_{c}"), precision[c]));
                m.push(Measurement::new(format!("recall_class_{c}"), recall[c]));
                m.push(Measurement::new(format!("f1_class_{c}"), f1[c]));
                m.push(Measurement::new(format!("support_class_{c}"), self.support[c]));
            }
        }
        m
    }
}
