use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScalerError {
    #[error("cannot fit a scaler on zero rows")]
    Empty,

    #[error("row {row} has {found} features, expected {expected}")]
    Width {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Per-feature centering and scaling to zero mean and unit variance.
///
/// Uses the population standard deviation (divides by `n`). A feature whose
/// variance is zero or not finite gets a scale of 1 so it passes through
/// centred but unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    center: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ScalerError> {
        let Some(first) = rows.first() else {
            return Err(ScalerError::Empty);
        };
        let width = first.len();
        let n = rows.len() as f64;

        let mut sum = vec![0.0; width];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ScalerError::Width {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
            for (s, v) in sum.iter_mut().zip(row) {
                *s += v;
            }
        }
        let center: Vec<f64> = sum.into_iter().map(|s| s / n).collect();

        let mut sq = vec![0.0; width];
        for row in rows {
            for ((acc, v), m) in sq.iter_mut().zip(row).zip(&center) {
                *acc += (v - m) * (v - m);
            }
        }
        let scale = sq
            .into_iter()
            .map(|s| {
                let sd = (s / n).sqrt();
                if sd.is_finite() && sd > 0.0 { sd } else { 1.0 }
            })
            .collect();

        Ok(Self { center, scale })
    }

    pub fn center(&self) -> &[f64] {
        &self.center
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn width(&self) -> usize {
        self.center.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        debug_assert_eq!(row.len(), self.width(), "row width mismatch");
        row.iter()
            .zip(self.center.iter().zip(&self.scale))
            .map(|(v, (c, s))| (v - c) / s)
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}

/// Statistics learned from the training partition: the standardizer plus the
/// per-feature values used to fill features missing at inference time.
///
/// For a real model the fill values are the training means, i.e. the same
/// numbers as the scaler's center.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStatistics {
    scaler: StandardScaler,
    fill_values: Vec<f64>,
}

impl FeatureStatistics {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ScalerError> {
        let scaler = StandardScaler::fit(rows)?;
        let fill_values = scaler.center().to_vec();
        Ok(Self {
            scaler,
            fill_values,
        })
    }

    /// Replaces the inference fill values, keeping the fitted scaler.
    pub fn with_fill_values(mut self, fill_values: Vec<f64>) -> Self {
        debug_assert_eq!(fill_values.len(), self.scaler.width());
        self.fill_values = fill_values;
        self
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn means(&self) -> &[f64] {
        self.scaler.center()
    }

    pub fn fill_values(&self) -> &[f64] {
        &self.fill_values
    }

    pub fn width(&self) -> usize {
        self.scaler.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fit_uses_population_standard_deviation() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let s = StandardScaler::fit(&rows).unwrap();
        assert_eq!(s.center(), &[2.0, 10.0]);
        assert_abs_diff_eq!(s.scale()[0], 1.0);
        assert_eq!(s.scale()[1], 1.0);
    }

    #[test]
    fn transformed_training_data_is_standardized() {
        let rows: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64 * 3.0 + 7.0]).collect();
        let s = StandardScaler::fit(&rows).unwrap();
        let t = s.transform(&rows);
        let mean: f64 = t.iter().map(|r| r[0]).sum::<f64>() / t.len() as f64;
        let var: f64 = t.iter().map(|r| (r[0] - mean).powi(2)).sum::<f64>() / t.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(var, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_column_gets_unit_scale() {
        let rows = vec![vec![5.0], vec![5.0], vec![5.0]];
        let s = StandardScaler::fit(&rows).unwrap();
        assert_eq!(s.scale(), &[1.0]);
        assert_eq!(s.transform_row(&[6.0]), vec![1.0]);
    }

    #[test]
    fn fit_rejects_empty_and_ragged_input() {
        assert_eq!(StandardScaler::fit(&[]), Err(ScalerError::Empty));
        assert_eq!(
            StandardScaler::fit(&[vec![1.0, 2.0], vec![1.0]]),
            Err(ScalerError::Width {
                row: 1,
                found: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn statistics_fill_values_default_to_means() {
        let stats = FeatureStatistics::fit(&[vec![1.0], vec![3.0]]).unwrap();
        assert_eq!(stats.fill_values(), &[2.0]);
        let stats = stats.with_fill_values(vec![500.0]);
        assert_eq!(stats.fill_values(), &[500.0]);
        assert_eq!(stats.means(), &[2.0]);
    }
}
