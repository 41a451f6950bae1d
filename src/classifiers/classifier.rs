use crate::core::instances::Instance;

pub trait Classifier: Send + Sync {
    /// Class probabilities for `instance`, indexed by class code.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>>;

    fn number_of_classes(&self) -> usize;

    /// Most voted class code. Ties go to the lowest code.
    fn predict(&self, instance: &dyn Instance) -> Option<usize> {
        let votes = self.get_votes_for_instance(instance)?;
        argmax(&votes)
    }
}

pub fn argmax(votes: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in votes.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
