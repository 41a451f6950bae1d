use crate::classifiers::Classifier;
use crate::evaluation::holdout::accuracy;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Reports an accuracy figure for the training partition of a fitted model.
///
/// The probe receives its own copy of the scaled training rows and encoded
/// labels, so whatever it does to them cannot reach the model or the fitted
/// statistics.
pub trait TrainingAccuracyProbe: Send + Sync {
    fn name(&self) -> &'static str;

    fn training_accuracy(
        &self,
        model: &dyn Classifier,
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
    ) -> f64;
}

/// Plain resubstitution accuracy.
#[derive(Debug, Default, Clone, Copy)]
pub struct CleanProbe;

impl TrainingAccuracyProbe for CleanProbe {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn training_accuracy(
        &self,
        model: &dyn Classifier,
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
    ) -> f64 {
        accuracy(model, &features, &labels)
    }
}

/// Deliberately pessimistic training accuracy: a fraction of the labels is
/// replaced by uniformly drawn codes and Gaussian noise is added to every
/// feature before scoring.
#[derive(Debug, Clone, Copy)]
pub struct NoisyLabelProbe {
    pub label_noise: f64,
    pub feature_noise_std: f64,
    pub seed: u64,
}

impl Default for NoisyLabelProbe {
    fn default() -> Self {
        Self {
            label_noise: 0.2,
            feature_noise_std: 0.03,
            seed: 42,
        }
    }
}

impl NoisyLabelProbe {
    /// Relabels `floor(n * label_noise)` distinct rows with codes in `0..n_classes`.
    pub fn corrupt_labels<R: Rng + ?Sized>(&self, labels: &mut [usize], n_classes: usize, rng: &mut R) {
        if n_classes == 0 || labels.is_empty() {
            return;
        }
        let fraction = self.label_noise.clamp(0.0, 1.0);
        let amount = (labels.len() as f64 * fraction).floor() as usize;
        for i in sample(rng, labels.len(), amount) {
            labels[i] = rng.random_range(0..n_classes);
        }
    }

    /// Adds N(0, feature_noise_std) to every value. A negative or
    /// non-finite deviation leaves the rows untouched.
    pub fn perturb_features<R: Rng + ?Sized>(&self, features: &mut [Vec<f64>], rng: &mut R) {
        let std = self.feature_noise_std;
        let normal = match Normal::new(0.0, std) {
            Ok(normal) if std.is_finite() && std >= 0.0 => normal,
            _ => {
                log::warn!("feature noise std {std} is invalid, features left untouched");
                return;
            }
        };
        for v in features.iter_mut().flatten() {
            *v += normal.sample(rng);
        }
    }
}

impl TrainingAccuracyProbe for NoisyLabelProbe {
    fn name(&self) -> &'static str {
        "noisy-label"
    }

    fn training_accuracy(
        &self,
        model: &dyn Classifier,
        mut features: Vec<Vec<f64>>,
        mut labels: Vec<usize>,
    ) -> f64 {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.corrupt_labels(&mut labels, model.number_of_classes(), &mut rng);
        self.perturb_features(&mut features, &mut rng);
        accuracy(model, &features, &labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ThresholdClassifier;

    fn separable() -> (Vec<Vec<f64>>, Vec<usize>) {
        let rows: Vec<Vec<f64>> = (0..100).map(|i| vec![if i % 2 == 0 { -5.0 } else { 5.0 }]).collect();
        let labels = (0..100).map(|i| i % 2).collect();
        (rows, labels)
    }

    #[test]
    fn clean_probe_is_resubstitution_accuracy() {
        let (rows, labels) = separable();
        let model = ThresholdClassifier::new(0, 0.0);
        assert_eq!(CleanProbe.training_accuracy(&model, rows, labels), 1.0);
    }

    #[test]
    fn noisy_probe_lowers_accuracy_deterministically() {
        let (rows, labels) = separable();
        let model = ThresholdClassifier::new(0, 0.0);
        let probe = NoisyLabelProbe::default();
        let a = probe.training_accuracy(&model, rows.clone(), labels.clone());
        let b = probe.training_accuracy(&model, rows, labels);
        assert_eq!(a, b);
        // At most 20 labels change and roughly half of them keep their class.
        assert!((0.8..1.0).contains(&a), "{a}");
    }

    #[test]
    fn corrupt_labels_touches_exact_fraction_at_most() {
        let probe = NoisyLabelProbe {
            label_noise: 0.5,
            ..NoisyLabelProbe::default()
        };
        let mut labels = vec![0usize; 10];
        probe.corrupt_labels(&mut labels, 1000, &mut StdRng::seed_from_u64(1));
        let changed = labels.iter().filter(|&&l| l != 0).count();
        assert!(changed <= 5 && changed >= 4, "{changed}");
    }

    #[test]
    fn invalid_noise_leaves_features() {
        let probe = NoisyLabelProbe {
            feature_noise_std: -1.0,
            ..NoisyLabelProbe::default()
        };
        let mut f = vec![vec![1.0, 2.0]];
        probe.perturb_features(&mut f, &mut StdRng::seed_from_u64(0));
        assert_eq!(f, vec![vec![1.0, 2.0]]);

        for std in [f64::NAN, f64::INFINITY] {
            let probe = NoisyLabelProbe {
                feature_noise_std: std,
                ..NoisyLabelProbe::default()
            };
            probe.perturb_features(&mut f, &mut StdRng::seed_from_u64(0));
            assert_eq!(f, vec![vec![1.0, 2.0]]);
        }
    }

    #[test]
    fn zero_noise_keeps_features() {
        let probe = NoisyLabelProbe {
            feature_noise_std: 0.0,
            ..NoisyLabelProbe::default()
        };
        let mut f = vec![vec![1.0, 2.0]];
        probe.perturb_features(&mut f, &mut StdRng::seed_from_u64(0));
        assert_eq!(f, vec![vec![1.0, 2.0]]);
    }
}
