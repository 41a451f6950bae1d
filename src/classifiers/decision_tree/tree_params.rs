use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_max_depth() -> Option<usize> {
    Some(10)
}
fn default_min_samples_leaf() -> usize {
    8
}
fn default_min_samples_split() -> usize {
    12
}

/// Number of candidate features drawn at every node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(MaxFeaturesKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum MaxFeatures {
    #[strum_discriminants(strum(message = "Square root of the feature count"))]
    Sqrt,
    #[strum_discriminants(strum(message = "Base-2 logarithm of the feature count"))]
    Log2,
    #[strum_discriminants(strum(message = "Every feature"))]
    All,
    #[strum_discriminants(strum(message = "A fixed number of features"))]
    Count(usize),
}

impl Default for MaxFeatures {
    fn default() -> Self {
        Self::Sqrt
    }
}

impl MaxFeatures {
    /// Resolved subset size for `n_features`, always within `1..=n_features`.
    pub fn resolve(&self, n_features: usize) -> usize {
        if n_features == 0 {
            return 0;
        }
        let n = n_features as f64;
        let k = match self {
            MaxFeatures::Sqrt => n.sqrt().floor() as usize,
            MaxFeatures::Log2 => n.log2().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(c) => *c,
        };
        k.clamp(1, n_features)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TreeParams {
    #[serde(default = "default_max_depth")]
    #[schemars(
        title = "Maximum depth",
        description = "Deepest level a tree may reach; null grows until leaves are pure.",
        default = "default_max_depth"
    )]
    pub max_depth: Option<usize>,

    #[serde(default = "default_min_samples_leaf")]
    #[schemars(
        title = "Minimum samples per leaf",
        description = "A split is only accepted when both children keep at least this many rows.",
        default = "default_min_samples_leaf"
    )]
    pub min_samples_leaf: usize,

    #[serde(default = "default_min_samples_split")]
    #[schemars(
        title = "Minimum samples to split",
        description = "Nodes with fewer rows than this become leaves.",
        default = "default_min_samples_split"
    )]
    pub min_samples_split: usize,

    #[serde(default)]
    #[schemars(
        title = "Features per split",
        description = "Size of the random feature subset examined at every node."
    )]
    pub max_features: MaxFeatures,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            min_samples_leaf: default_min_samples_leaf(),
            min_samples_split: default_min_samples_split(),
            max_features: MaxFeatures::default(),
        }
    }
}
