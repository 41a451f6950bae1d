use crate::core::instances::instance::Instance;
use std::io::{Error, ErrorKind};

/// A borrowed, unlabelled feature row with unit weight.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a>(pub &'a [f64]);

impl Instance for RowView<'_> {
    fn weight(&self) -> f64 {
        1.0
    }

    fn set_weight(&mut self, _new_value: f64) -> Result<(), Error> {
        Err(Error::new(ErrorKind::Unsupported, "borrowed rows carry no weight"))
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    fn number_of_attributes(&self) -> usize {
        self.0.len()
    }

    fn class_value(&self) -> Option<usize> {
        None
    }

    fn values(&self) -> &[f64] {
        self.0
    }
}
