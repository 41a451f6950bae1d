pub trait SplitCriterion: Send + Sync {
    /// Impurity of a (weighted) class distribution.
    fn impurity(&self, distribution: &[f64]) -> f64;

    /// Impurity decrease obtained by splitting `pre_split_distribution` into
    /// `post_split_dists`. Higher is better.
    fn get_merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>])
    -> f64;
}
