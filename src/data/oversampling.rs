use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OversamplingError {
    #[error("class {class} has {count} sample(s); at least 2 are needed to synthesize neighbours")]
    TooFewSamples { class: usize, count: usize },

    #[error("feature rows and labels differ in length ({rows} vs {labels})")]
    LengthMismatch { rows: usize, labels: usize },
}

/// Synthetic minority oversampling.
///
/// Every class below the majority count receives synthetic rows until it
/// matches the majority. A synthetic row lies on the segment between a random
/// member of the class and one of its `k_neighbors` nearest same-class
/// neighbours (Euclidean distance on the raw features).
#[derive(Debug, Clone)]
pub struct Smote {
    k_neighbors: usize,
    seed: u64,
}

impl Smote {
    pub fn new(k_neighbors: usize, seed: u64) -> Self {
        Self {
            k_neighbors: k_neighbors.max(1),
            seed,
        }
    }

    /// Returns the input rows followed by the synthetic ones.
    pub fn fit_resample(
        &self,
        rows: &[Vec<f64>],
        labels: &[usize],
    ) -> Result<(Vec<Vec<f64>>, Vec<usize>), OversamplingError> {
        if rows.len() != labels.len() {
            return Err(OversamplingError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }

        let n_classes = labels.iter().max().map_or(0, |m| m + 1);
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (i, &c) in labels.iter().enumerate() {
            members[c].push(i);
        }
        let majority = members.iter().map(Vec::len).max().unwrap_or(0);

        for (class, idx) in members.iter().enumerate() {
            if !idx.is_empty() && idx.len() < majority && idx.len() < 2 {
                return Err(OversamplingError::TooFewSamples {
                    class,
                    count: idx.len(),
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut out_rows = rows.to_vec();
        let mut out_labels = labels.to_vec();

        for (class, idx) in members.iter().enumerate() {
            if idx.is_empty() || idx.len() >= majority {
                continue;
            }
            let k = self.k_neighbors.min(idx.len() - 1);
            let neighbours: Vec<Vec<usize>> = idx
                .iter()
                .map(|&i| nearest_neighbours(rows, i, idx, k))
                .collect();

            let needed = majority - idx.len();
            log::debug!("SMOTE: synthesizing {needed} rows for class {class} (k={k})");
            for _ in 0..needed {
                let pick = rng.random_range(0..idx.len());
                let neighbour = neighbours[pick][rng.random_range(0..k)];
                let gap: f64 = rng.random();
                let base = &rows[idx[pick]];
                let other = &rows[neighbour];
                out_rows.push(
                    base.iter()
                        .zip(other.iter())
                        .map(|(a, b)| a + gap * (b - a))
                        .collect(),
                );
                out_labels.push(class);
            }
        }

        Ok((out_rows, out_labels))
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// The `k` members of `candidates` closest to row `target`, itself excluded.
fn nearest_neighbours(rows: &[Vec<f64>], target: usize, candidates: &[usize], k: usize) -> Vec<usize> {
    let mut scored: Vec<(f64, usize)> = candidates
        .iter()
        .filter(|&&c| c != target)
        .map(|&c| (squared_distance(&rows[target], &rows[c]), c))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    scored.into_iter().take(k).map(|(_, c)| c).collect()
}
