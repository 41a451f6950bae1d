use crate::classifiers::decision_tree::split_criteria::split_criterion::SplitCriterion;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion {}

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self {}
    }

    pub fn compute_gini(&self, distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        if distribution_sum_of_weights <= 0.0 {
            return 0.0;
        }
        let mut gini = 1.0;
        for i in distribution {
            let rel_freq = i / distribution_sum_of_weights;
            gini -= rel_freq.powf(2.0);
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn impurity(&self, distribution: &[f64]) -> f64 {
        self.compute_gini(distribution, distribution.iter().sum())
    }

    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let total: f64 = pre_split_distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted_children: f64 = post_split_dists
            .iter()
            .map(|d| {
                let w: f64 = d.iter().sum();
                (w / total) * self.compute_gini(d, w)
            })
            .sum();
        self.compute_gini(pre_split_distribution, total) - weighted_children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gini_of_pure_and_even_distributions() {
        let g = GiniSplitCriterion::new();
        assert_eq!(g.impurity(&[4.0, 0.0]), 0.0);
        assert_abs_diff_eq!(g.impurity(&[2.0, 2.0]), 0.5);
        assert_abs_diff_eq!(g.impurity(&[1.0, 1.0, 1.0]), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(g.impurity(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn perfect_split_recovers_all_impurity() {
        let g = GiniSplitCriterion::new();
        let merit = g.get_merit_of_split(&[3.0, 3.0], &[vec![3.0, 0.0], vec![0.0, 3.0]]);
        assert_abs_diff_eq!(merit, 0.5);
    }

    #[test]
    fn useless_split_has_zero_merit() {
        let g = GiniSplitCriterion::new();
        let merit = g.get_merit_of_split(&[4.0, 4.0], &[vec![2.0, 2.0], vec![2.0, 2.0]]);
        assert_abs_diff_eq!(merit, 0.0);
    }
}
