use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// How each tree of the forest sees the training rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
pub enum ModelKind {
    #[default]
    #[strum(
        message = "Balanced random forest",
        detailed_message = "Every tree draws the same number of rows from each class."
    )]
    Balanced,
    #[strum(
        message = "Random forest with balanced class weights",
        detailed_message = "Plain bootstrap per tree; rows are weighted inversely to class frequency."
    )]
    Standard,
}

/// Row indices grouped by class code.
pub fn class_members(labels: &[usize], n_classes: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); n_classes];
    for (i, &c) in labels.iter().enumerate() {
        members[c].push(i);
    }
    members
}

/// Draws, with replacement, as many rows from every present class as the
/// smallest present class has.
pub fn balanced_bootstrap<R: Rng + ?Sized>(members: &[Vec<usize>], rng: &mut R) -> Vec<usize> {
    let Some(minority) = members.iter().map(Vec::len).filter(|&n| n > 0).min() else {
        return Vec::new();
    };
    let mut sample = Vec::with_capacity(minority * members.len());
    for class in members.iter().filter(|m| !m.is_empty()) {
        for _ in 0..minority {
            sample.push(class[rng.random_range(0..class.len())]);
        }
    }
    sample
}

/// `n` draws with replacement from `0..n`.
pub fn bootstrap<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    (0..n).map(|_| rng.random_range(0..n)).collect()
}

/// `n / (k * n_c)` per row, where `k` counts the classes present.
pub fn balanced_class_weights(labels: &[usize], members: &[Vec<usize>]) -> Vec<f64> {
    let n = labels.len() as f64;
    let k = members.iter().filter(|m| !m.is_empty()).count() as f64;
    labels
        .iter()
        .map(|&c| n / (k * members[c].len() as f64))
        .collect()
}
