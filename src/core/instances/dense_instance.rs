use crate::core::instances::instance::Instance;
use std::io::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct DenseInstance {
    pub values: Vec<f64>,
    pub class_value: Option<usize>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(values: Vec<f64>, class_value: Option<usize>, weight: f64) -> DenseInstance {
        DenseInstance {
            values,
            class_value,
            weight,
        }
    }

    /// Unit-weight labelled sample.
    pub fn labelled(values: Vec<f64>, class_value: usize) -> DenseInstance {
        Self::new(values, Some(class_value), 1.0)
    }

    /// Unit-weight sample without a class, as seen at inference time.
    pub fn unlabelled(values: Vec<f64>) -> DenseInstance {
        Self::new(values, None, 1.0)
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, new_value: f64) -> Result<(), Error> {
        if new_value < 0.0 || !new_value.is_finite() {
            Err(Error::new(
                std::io::ErrorKind::InvalidInput,
                "Weight must be finite and non-negative",
            ))
        } else {
            self.weight = new_value;
            Ok(())
        }
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn number_of_attributes(&self) -> usize {
        self.values.len()
    }

    fn class_value(&self) -> Option<usize> {
        self.class_value
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_reflect_construction() {
        let i = DenseInstance::labelled(vec![1.0, 2.5], 3);
        assert_eq!(i.value_at_index(1), Some(2.5));
        assert_eq!(i.value_at_index(2), None);
        assert_eq!(i.class_value(), Some(3));
        assert_eq!(i.number_of_attributes(), 2);
        assert_eq!(i.weight(), 1.0);
        assert!(DenseInstance::unlabelled(vec![0.0]).class_value().is_none());
    }

    #[test]
    fn set_weight_rejects_negative_and_nan() {
        let mut i = DenseInstance::labelled(vec![0.0], 0);
        assert!(i.set_weight(-1.0).is_err());
        assert!(i.set_weight(f64::NAN).is_err());
        i.set_weight(2.5).unwrap();
        assert_eq!(i.weight(), 2.5);
    }
}
