use crate::core::attributes::Attribute;

/// Normalizes a feature name the way loosely-keyed clients spell it:
/// lower-cased, with spaces and hyphens collapsed into `_`.
///
/// `"C-reactive Protein"` becomes `"c_reactive_protein"`.
pub fn normalize_feature_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// A numeric clinical measurement that is part of the model input.
///
/// Besides the canonical name, the attribute carries the exhaustive list of
/// keys accepted for it at inference time, in precedence order:
/// exact name, normalized name, then the normalized name with `_` spelled as
/// a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericAttribute {
    name: String,
    aliases: Vec<String>,
}

impl NumericAttribute {
    pub fn new(name: impl Into<String>) -> NumericAttribute {
        let name = name.into();
        let normalized = normalize_feature_name(&name);
        let alt_separator = normalized.replace('_', " ");

        let mut aliases = vec![name.clone()];
        for candidate in [normalized, alt_separator] {
            if !aliases.contains(&candidate) {
                aliases.push(candidate);
            }
        }
        NumericAttribute { name, aliases }
    }

    /// Accepted keys, highest precedence first. The canonical name is always first.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> &str {
        &self.name
    }
}
