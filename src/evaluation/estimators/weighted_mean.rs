use crate::evaluation::estimators::Estimator;

/// Weighted mean: `Σ w·v / Σ w`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WeightedMean {
    weight: f64,
    sum: f64,
}

impl Estimator for WeightedMean {
    #[inline]
    fn add_weighted(&mut self, value: f64, weight: f64) {
        if value.is_nan() || weight.is_nan() || weight <= 0.0 {
            return;
        }
        self.weight += weight;
        self.sum += value * weight;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            f64::NAN
        }
    }

    fn total_weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_mean_is_nan() {
        assert!(WeightedMean::default().estimation().is_nan());
    }

    #[test]
    fn weights_scale_contributions() {
        let mut m = WeightedMean::default();
        m.add_weighted(1.0, 3.0);
        m.add(0.0);
        assert_abs_diff_eq!(m.estimation(), 0.75);
        assert_eq!(m.total_weight(), 4.0);
    }

    #[test]
    fn nan_and_non_positive_weights_are_ignored() {
        let mut m = WeightedMean::default();
        m.add(f64::NAN);
        m.add_weighted(5.0, 0.0);
        m.add_weighted(5.0, f64::NAN);
        assert_eq!(m, WeightedMean::default());
    }
}
