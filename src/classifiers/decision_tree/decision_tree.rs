use crate::classifiers::classifier::Classifier;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::decision_tree::instance_conditional_test::NumericAttributeBinaryTest;
use crate::classifiers::decision_tree::nodes::{LeafNode, Node, SplitNode};
use crate::classifiers::decision_tree::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::classifiers::decision_tree::tree_params::TreeParams;
use crate::core::instances::{Instance, RowView};
use rand::Rng;
use rand::seq::SliceRandom;

/// Weighted rows a tree is grown from. `rows[i]` has class `labels[i]` and
/// weight `weights[i]`.
pub struct TrainingView<'a> {
    pub rows: &'a [Vec<f64>],
    pub labels: &'a [usize],
    pub weights: &'a [f64],
    pub n_classes: usize,
}

impl TrainingView<'_> {
    fn class_distribution(&self, indices: &[usize]) -> Vec<f64> {
        let mut dist = vec![0.0; self.n_classes];
        for &i in indices {
            dist[self.labels[i]] += self.weights[i];
        }
        dist
    }

    fn n_attributes(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// A CART classification tree with binary numeric splits.
pub struct DecisionTree {
    root: Box<dyn Node>,
    n_classes: usize,
    n_attributes: usize,
}

impl DecisionTree {
    /// Grows a tree over the rows named by `sample`, which may repeat.
    ///
    /// At every node a random subset of `max_features` attributes is
    /// searched for the best Gini split. When none of them can split the
    /// node, the remaining attributes are tried in random order until one
    /// can, so a node only becomes a leaf when no attribute separates it.
    pub fn fit<R: Rng + ?Sized>(
        view: &TrainingView<'_>,
        sample: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let builder = TreeBuilder {
            view,
            params,
            criterion: GiniSplitCriterion::new(),
            features_per_split: params.max_features.resolve(view.n_attributes()),
        };
        let root = builder.grow(sample, 0, rng);
        Self {
            root,
            n_classes: view.n_classes,
            n_attributes: view.n_attributes(),
        }
    }

    pub fn root(&self) -> &dyn Node {
        self.root.as_ref()
    }

    pub fn number_of_leaves(&self) -> usize {
        self.root.number_of_leaves()
    }

    /// Impurity-based importances, normalized to sum to 1 (all zero for a stump).
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0.0; self.n_attributes];
        self.root.accumulate_importances(&mut importances);
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        }
        importances
    }
}

impl Classifier for DecisionTree {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        Some(self.root.get_class_votes(instance))
    }

    fn number_of_classes(&self) -> usize {
        self.n_classes
    }
}

struct TreeBuilder<'a, 'v> {
    view: &'a TrainingView<'v>,
    params: &'a TreeParams,
    criterion: GiniSplitCriterion,
    features_per_split: usize,
}

impl TreeBuilder<'_, '_> {
    fn grow<R: Rng + ?Sized>(&self, indices: Vec<usize>, depth: usize, rng: &mut R) -> Box<dyn Node> {
        let distribution = self.view.class_distribution(&indices);
        let leaf = |d: Vec<f64>| -> Box<dyn Node> { Box::new(LeafNode::new(d)) };

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached
            || indices.len() < self.params.min_samples_split.max(2)
            || LeafNode::num_non_zero_entries(&distribution) < 2
        {
            return leaf(distribution);
        }

        let Some(mut best) = self.best_split(&indices, &distribution, rng) else {
            return leaf(distribution);
        };
        let Some(split_test) = best.take_split_test() else {
            return leaf(distribution);
        };

        let mut branches: Vec<Vec<usize>> = vec![Vec::new(); split_test.max_branches()];
        for &i in &indices {
            let row = RowView(&self.view.rows[i]);
            if let Some(b) = split_test.branch_for_instance(&row) {
                branches[b].push(i);
            }
        }

        let node_weight: f64 = distribution.iter().sum();
        let decrease = node_weight * best.get_merit();
        let children = branches
            .into_iter()
            .map(|b| self.grow(b, depth + 1, rng))
            .collect();
        Box::new(SplitNode::new(split_test, distribution, children, decrease))
    }

    fn best_split<R: Rng + ?Sized>(
        &self,
        indices: &[usize],
        distribution: &[f64],
        rng: &mut R,
    ) -> Option<AttributeSplitSuggestion> {
        let mut features: Vec<usize> = (0..self.view.n_attributes()).collect();
        features.shuffle(rng);

        let mut best: Option<AttributeSplitSuggestion> = None;
        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.features_per_split && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(feature, indices, distribution) {
                if best.as_ref().is_none_or(|b| candidate > *b) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Best midpoint threshold on one attribute, honouring `min_samples_leaf`.
    fn best_split_on(
        &self,
        feature: usize,
        indices: &[usize],
        distribution: &[f64],
    ) -> Option<AttributeSplitSuggestion> {
        let rows = self.view.rows;
        let mut order: Vec<usize> = indices.to_vec();
        order.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

        let min_leaf = self.params.min_samples_leaf.max(1);
        let n = order.len();
        let mut left = vec![0.0; self.view.n_classes];
        let mut best: Option<(f64, f64)> = None;

        for pos in 0..n.saturating_sub(1) {
            let i = order[pos];
            left[self.view.labels[i]] += self.view.weights[i];

            let here = rows[i][feature];
            let next = rows[order[pos + 1]][feature];
            if here == next || pos + 1 < min_leaf || n - (pos + 1) < min_leaf {
                continue;
            }

            let right: Vec<f64> = distribution.iter().zip(&left).map(|(t, l)| t - l).collect();
            let merit = self
                .criterion
                .get_merit_of_split(distribution, &[left.clone(), right]);
            if best.is_none_or(|(m, _)| merit > m) {
                let mut threshold = here + (next - here) / 2.0;
                if threshold >= next {
                    threshold = here;
                }
                best = Some((merit, threshold));
            }
        }

        best.map(|(merit, threshold)| {
            AttributeSplitSuggestion::new(
                Some(Box::new(NumericAttributeBinaryTest::new(feature, threshold, true))),
                merit,
            )
        })
    }
}
