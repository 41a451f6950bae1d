use crate::core::attributes::{Attribute, NumericAttribute};
use std::collections::HashMap;

/// Canonical blood-panel measurements, in model input order.
pub const BLOOD_PANEL_FEATURES: [&str; 24] = [
    "Glucose",
    "Cholesterol",
    "Hemoglobin",
    "Platelets",
    "White Blood Cells",
    "Red Blood Cells",
    "Hematocrit",
    "Mean Corpuscular Volume",
    "Mean Corpuscular Hemoglobin",
    "Mean Corpuscular Hemoglobin Concentration",
    "Insulin",
    "BMI",
    "Systolic Blood Pressure",
    "Diastolic Blood Pressure",
    "Triglycerides",
    "HbA1c",
    "LDL Cholesterol",
    "HDL Cholesterol",
    "ALT",
    "AST",
    "Heart Rate",
    "Creatinine",
    "Troponin",
    "C-reactive Protein",
];

/// Name of the label column in training and test tables.
pub const LABEL_COLUMN: &str = "Disease";

/// Ordered list of the numeric features a model consumes.
///
/// The order is fixed for the lifetime of a trained model; every sample is
/// resolved to exactly this many values before it reaches the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    attributes: Vec<NumericAttribute>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: names.into_iter().map(NumericAttribute::new).collect(),
        }
    }

    pub fn blood_panel() -> Self {
        Self::new(BLOOD_PANEL_FEATURES)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[NumericAttribute] {
        &self.attributes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    /// Looks up every feature in a loosely-keyed map.
    ///
    /// For each feature the aliases are tried in precedence order. A key
    /// whose value `is_blank` reports as empty is skipped; the first other
    /// key present wins, even if its value later turns out to be unusable.
    /// Features with no such key resolve to `None`.
    pub fn resolve<'a, V, F>(&self, input: &'a HashMap<String, V>, is_blank: F) -> Vec<Option<&'a V>>
    where
        F: Fn(&V) -> bool,
    {
        self.attributes
            .iter()
            .map(|attr| {
                attr.aliases()
                    .iter()
                    .filter_map(|alias| input.get(alias))
                    .find(|v| !is_blank(*v))
            })
            .collect()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::blood_panel()
    }
}
