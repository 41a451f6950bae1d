/// Running scalar estimate fed one observation at a time.
pub trait Estimator {
    /// Adds `value` with the given weight. NaN values and non-positive
    /// weights are ignored.
    fn add_weighted(&mut self, value: f64, weight: f64);

    fn add(&mut self, value: f64) {
        self.add_weighted(value, 1.0);
    }

    /// NaN until something has been added.
    fn estimation(&self) -> f64;

    fn total_weight(&self) -> f64;
}
