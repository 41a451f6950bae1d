use std::io::Error;

/// A single sample: an ordered feature vector plus an optional class code.
pub trait Instance {
    fn weight(&self) -> f64;

    fn set_weight(&mut self, new_value: f64) -> Result<(), Error>;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn number_of_attributes(&self) -> usize;

    fn class_value(&self) -> Option<usize>;

    fn values(&self) -> &[f64];
}
