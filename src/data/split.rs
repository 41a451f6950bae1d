use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Row indices of a train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Splits row indices into train and validation, preserving class proportions.
///
/// Classes are visited in sorted label order. Within a class the rows are
/// shuffled with a generator seeded from `seed`, then
/// `round(n_class * validation_fraction)` of them go to validation, always
/// leaving at least one row of the class in train. The same labels, fraction
/// and seed always produce the same split.
pub fn stratified_split<S: AsRef<str>>(
    labels: &[S],
    validation_fraction: f64,
    seed: u64,
) -> SplitIndices {
    let fraction = if validation_fraction.is_finite() {
        validation_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        by_class.entry(label.as_ref()).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut validation = Vec::new();

    for (_, mut rows) in by_class {
        rows.shuffle(&mut rng);
        let n = rows.len();
        let n_val = ((n as f64 * fraction).round() as usize).min(n.saturating_sub(1));
        validation.extend_from_slice(&rows[..n_val]);
        train.extend_from_slice(&rows[n_val..]);
    }

    SplitIndices { train, validation }
}
