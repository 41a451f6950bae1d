use crate::classifiers::classifier::Classifier;
use crate::classifiers::decision_tree::{DecisionTree, TrainingView, TreeParams};
use crate::classifiers::random_forest::sampling::{
    ModelKind, balanced_bootstrap, balanced_class_weights, bootstrap, class_members,
};
use crate::core::instances::{Instance, RowView};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Generator for tree `index`, independent of how many trees exist.
pub fn tree_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A forest of CART trees combined by averaging their leaf distributions.
///
/// Trees are grown in batches through [`RandomForest::grow_to`]. Tree `i`
/// depends only on the seed, `i` and the training rows, so growing 100 trees
/// and then 100 more yields the same forest as growing 200 at once.
pub struct RandomForest {
    kind: ModelKind,
    params: TreeParams,
    seed: u64,
    n_classes: usize,
    n_attributes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(kind: ModelKind, params: TreeParams, seed: u64, n_classes: usize) -> Self {
        Self {
            kind,
            params,
            seed,
            n_classes,
            n_attributes: 0,
            trees: Vec::new(),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Fits trees `n_trees()..target` on the same rows every call.
    pub fn grow_to(&mut self, rows: &[Vec<f64>], labels: &[usize], target: usize) {
        if target <= self.trees.len() || rows.is_empty() {
            return;
        }
        debug_assert_eq!(rows.len(), labels.len());
        self.n_attributes = rows[0].len();

        let members = class_members(labels, self.n_classes);
        let weights = match self.kind {
            ModelKind::Balanced => vec![1.0; labels.len()],
            ModelKind::Standard => balanced_class_weights(labels, &members),
        };
        let view = TrainingView {
            rows,
            labels,
            weights: &weights,
            n_classes: self.n_classes,
        };

        let start = self.trees.len();
        let (kind, params, seed) = (self.kind, &self.params, self.seed);
        let new_trees: Vec<DecisionTree> = (start..target)
            .into_par_iter()
            .map(|index| {
                let mut rng = tree_rng(seed, index);
                let sample = match kind {
                    ModelKind::Balanced => balanced_bootstrap(&members, &mut rng),
                    ModelKind::Standard => bootstrap(rows.len(), &mut rng),
                };
                DecisionTree::fit(&view, sample, params, &mut rng)
            })
            .collect();

        log::debug!("Grew trees {start}..{target} ({} kind)", self.kind);
        self.trees.extend(new_trees);
    }

    /// Drops every tree past the first `n_trees`.
    pub fn truncate(&mut self, n_trees: usize) {
        self.trees.truncate(n_trees);
    }

    /// Averaged class probabilities for one feature row.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let instance = RowView(row);
        let mut total = vec![0.0; self.n_classes];
        for tree in &self.trees {
            if let Some(votes) = tree.get_votes_for_instance(&instance) {
                total.iter_mut().zip(votes).for_each(|(t, v)| *t += v);
            }
        }
        if !self.trees.is_empty() {
            let n = self.trees.len() as f64;
            total.iter_mut().for_each(|t| *t /= n);
        }
        total
    }

    pub fn predict_row(&self, row: &[f64]) -> Option<usize> {
        self.predict(&RowView(row))
    }

    /// Mean of the per-tree normalized impurity importances.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.n_attributes];
        for tree in &self.trees {
            total
                .iter_mut()
                .zip(tree.feature_importances())
                .for_each(|(t, v)| *t += v);
        }
        if !self.trees.is_empty() {
            let n = self.trees.len() as f64;
            total.iter_mut().for_each(|t| *t /= n);
        }
        total
    }
}

impl Classifier for RandomForest {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        if self.trees.is_empty() {
            return None;
        }
        Some(self.predict_proba(instance.values()))
    }

    fn number_of_classes(&self) -> usize {
        self.n_classes
    }
}
