use crate::classifiers::decision_tree::nodes::node::{Node, normalized};
use crate::core::instances::Instance;

pub struct LeafNode {
    observed_class_distribution: Vec<f64>,
}

impl LeafNode {
    pub fn new(observed_class_distribution: Vec<f64>) -> Self {
        Self {
            observed_class_distribution,
        }
    }

    pub fn num_non_zero_entries(vec: &[f64]) -> usize {
        vec.iter().filter(|&&x| x != 0.0).count()
    }

    pub fn observed_class_distribution_is_pure(&self) -> bool {
        Self::num_non_zero_entries(&self.observed_class_distribution) < 2
    }
}

impl Node for LeafNode {
    fn get_observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn filter_instance_to_leaf<'a>(&'a self, _instance: &dyn Instance) -> &'a dyn Node {
        self
    }

    fn get_class_votes(&self, _instance: &dyn Instance) -> Vec<f64> {
        normalized(&self.observed_class_distribution)
    }

    fn number_of_leaves(&self) -> usize {
        1
    }

    fn accumulate_importances(&self, _importances: &mut [f64]) {}
}
