use crate::core::attributes::Attribute;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("label '{0}' was not seen during training")]
    UnseenLabel(String),

    #[error("class code {0} is outside the vocabulary")]
    UnknownCode(usize),

    #[error("cannot build a label vocabulary from zero labels")]
    Empty,
}

/// Bijection between disease labels and dense class codes.
///
/// Labels are trimmed before they are stored or looked up. Codes follow the
/// sorted order of the distinct labels, so fitting the same label set twice
/// always yields the same codes. The vocabulary never grows after fitting:
/// an unseen label is an error, not a new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    name: String,
    values: Vec<String>,
    label_to_index: HashMap<String, usize>,
}

impl LabelVocabulary {
    pub fn fit<I, S>(name: impl Into<String>, labels: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .collect();
        if distinct.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self::with_values(name, distinct.into_iter().collect()))
    }

    /// Builds a vocabulary from values that are already unique, keeping their order.
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Self {
            name: name.into(),
            values,
            label_to_index,
        }
    }

    pub fn encode(&self, label: &str) -> Result<usize, VocabularyError> {
        let trimmed = label.trim();
        self.label_to_index
            .get(trimmed)
            .copied()
            .ok_or_else(|| VocabularyError::UnseenLabel(trimmed.to_string()))
    }

    pub fn encode_all<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>, VocabularyError> {
        labels.iter().map(|l| self.encode(l.as_ref())).collect()
    }

    pub fn decode(&self, code: usize) -> Result<&str, VocabularyError> {
        self.values
            .get(code)
            .map(String::as_str)
            .ok_or(VocabularyError::UnknownCode(code))
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Attribute for LabelVocabulary {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_sorts_and_trims_labels() {
        let v = LabelVocabulary::fit("Disease", [" Healthy", "Anemia ", "Healthy", "Diabetes"])
            .unwrap();
        assert_eq!(v.values(), &["Anemia", "Diabetes", "Healthy"]);
        assert_eq!(v.encode("Anemia").unwrap(), 0);
        assert_eq!(v.encode("  Healthy  ").unwrap(), 2);
        assert_eq!(v.name(), "Disease");
    }

    #[test]
    fn encode_then_decode_returns_trimmed_label() {
        let raw = ["Thalasse ", " Thromboc", "Heart Di", "Healthy"];
        let v = LabelVocabulary::fit("Disease", raw).unwrap();
        for label in raw {
            let code = v.encode(label).unwrap();
            assert_eq!(v.decode(code).unwrap(), label.trim());
        }
    }

    #[test]
    fn unseen_label_is_an_error() {
        let v = LabelVocabulary::fit("Disease", ["Healthy"]).unwrap();
        assert_eq!(
            v.encode("Diabetes"),
            Err(VocabularyError::UnseenLabel("Diabetes".into()))
        );
        assert!(v.encode_all(&["Healthy", "Anemia"]).is_err());
        assert_eq!(v.decode(3), Err(VocabularyError::UnknownCode(3)));
    }

    #[test]
    fn empty_input_is_rejected() {
        let none: [&str; 0] = [];
        assert_eq!(
            LabelVocabulary::fit("Disease", none),
            Err(VocabularyError::Empty)
        );
    }
}
