use crate::classifiers::Classifier;
use crate::core::instances::Instance;

/// Two-class stub: class 0 below `threshold` on one attribute, class 1 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdClassifier {
    pub attribute: usize,
    pub threshold: f64,
}

impl ThresholdClassifier {
    pub fn new(attribute: usize, threshold: f64) -> Self {
        Self {
            attribute,
            threshold,
        }
    }
}

impl Classifier for ThresholdClassifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        let v = instance.value_at_index(self.attribute)?;
        Some(if v < self.threshold {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        })
    }

    fn number_of_classes(&self) -> usize {
        2
    }
}
