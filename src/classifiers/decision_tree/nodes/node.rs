use crate::core::instances::Instance;

pub trait Node: Send + Sync {
    /// Weighted class counts of the training rows that reached this node.
    fn get_observed_class_distribution(&self) -> &[f64];
    fn is_leaf(&self) -> bool;
    fn filter_instance_to_leaf<'a>(&'a self, instance: &dyn Instance) -> &'a dyn Node;
    /// Class probabilities predicted for `instance`.
    fn get_class_votes(&self, instance: &dyn Instance) -> Vec<f64>;
    fn number_of_leaves(&self) -> usize;
    /// Adds this subtree's weighted impurity decrease to `importances`, per attribute.
    fn accumulate_importances(&self, importances: &mut [f64]);
}

pub(crate) fn normalized(distribution: &[f64]) -> Vec<f64> {
    let total: f64 = distribution.iter().sum();
    if total > 0.0 {
        distribution.iter().map(|w| w / total).collect()
    } else {
        vec![0.0; distribution.len()]
    }
}
