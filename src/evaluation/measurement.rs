use serde::Serialize;

/// One named scalar reported by an evaluator, e.g. `"accuracy"`,
/// `"kappa"` or `"recall_class_2"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Value of the first measurement called `name`.
    pub fn find(measurements: &[Measurement], name: &str) -> Option<f64> {
        measurements.iter().find(|m| m.name == name).map(|m| m.value)
    }
}
