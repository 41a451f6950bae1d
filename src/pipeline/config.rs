use crate::classifiers::{ModelKind, TreeParams};
use crate::evaluation::{CleanProbe, NoisyLabelProbe, TrainingAccuracyProbe};
use crate::predictor::VectorFillPolicy;
use crate::tasks::EarlyStoppingPolicy;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_train_file() -> String {
    "Blood_sample_dataset_balanced.csv".into()
}
fn default_test_file() -> String {
    "blood_samples_dataset_test.csv".into()
}
fn default_validation_fraction() -> f64 {
    0.2
}
fn default_seed() -> u64 {
    42
}
fn default_oversampling() -> bool {
    true
}
fn default_smote_neighbors() -> usize {
    5
}
fn default_tree_stages() -> Vec<usize> {
    vec![100, 200, 300]
}
fn default_label_noise() -> f64 {
    0.2
}
fn default_feature_noise_std() -> f64 {
    0.03
}

/// Empty parameter object for choices without settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NoisyLabelParams {
    #[serde(default = "default_label_noise")]
    #[schemars(
        title = "Label noise",
        description = "Fraction of training labels replaced by random codes before scoring.",
        default = "default_label_noise"
    )]
    pub label_noise: f64,

    #[serde(default = "default_feature_noise_std")]
    #[schemars(
        title = "Feature noise",
        description = "Standard deviation of the Gaussian noise added to scaled features.",
        default = "default_feature_noise_std"
    )]
    pub feature_noise_std: f64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for NoisyLabelParams {
    fn default() -> Self {
        Self {
            label_noise: default_label_noise(),
            feature_noise_std: default_feature_noise_std(),
            seed: default_seed(),
        }
    }
}

/// How the per-stage training accuracy is measured.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ProbeKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ProbeChoice {
    #[strum_discriminants(strum(
        message = "Clean training accuracy",
        detailed_message = "Scores the forest on its own scaled training rows."
    ))]
    Clean(NoParams),
    #[strum_discriminants(strum(
        message = "Noisy-label training accuracy",
        detailed_message = "Scores a copy of the training rows with relabelled rows and jittered features."
    ))]
    NoisyLabel(NoisyLabelParams),
}

impl Default for ProbeChoice {
    fn default() -> Self {
        Self::NoisyLabel(NoisyLabelParams::default())
    }
}

impl From<&ProbeChoice> for Box<dyn TrainingAccuracyProbe> {
    fn from(choice: &ProbeChoice) -> Self {
        match choice {
            ProbeChoice::Clean(_) => Box::new(CleanProbe),
            ProbeChoice::NoisyLabel(p) => Box::new(NoisyLabelProbe {
                label_noise: p.label_noise,
                feature_noise_std: p.feature_noise_std,
                seed: p.seed,
            }),
        }
    }
}

/// Every tunable of the fit pipeline and the predictor service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_data_dir")]
    #[schemars(
        title = "Data directory",
        description = "Directory holding the training and test CSV files.",
        default = "default_data_dir"
    )]
    pub data_dir: PathBuf,

    #[serde(default = "default_train_file")]
    #[schemars(title = "Training file", default = "default_train_file")]
    pub train_file: String,

    #[serde(default = "default_test_file")]
    #[schemars(
        title = "Test file",
        description = "Optional; when absent the reported accuracy is 0.",
        default = "default_test_file"
    )]
    pub test_file: String,

    #[serde(default = "default_validation_fraction")]
    #[schemars(
        title = "Validation fraction",
        description = "Share of every class held out of training for early stopping.",
        default = "default_validation_fraction"
    )]
    pub validation_fraction: f64,

    #[serde(default = "default_seed")]
    #[schemars(
        title = "Seed",
        description = "Seeds the split, oversampling and every tree.",
        default = "default_seed"
    )]
    pub seed: u64,

    #[serde(default = "default_oversampling")]
    #[schemars(
        title = "Oversampling",
        description = "Synthesize minority-class training rows (SMOTE) before fitting the forest.",
        default = "default_oversampling"
    )]
    pub oversampling: bool,

    #[serde(default = "default_smote_neighbors")]
    #[schemars(title = "SMOTE neighbours", default = "default_smote_neighbors")]
    pub smote_k_neighbors: usize,

    #[serde(default)]
    #[schemars(title = "Model kind")]
    pub model_kind: ModelKind,

    #[serde(default)]
    #[schemars(title = "Tree parameters")]
    pub tree: TreeParams,

    #[serde(default = "default_tree_stages")]
    #[schemars(
        title = "Tree stages",
        description = "Increasing forest sizes evaluated one after another.",
        default = "default_tree_stages"
    )]
    pub tree_stages: Vec<usize>,

    #[serde(default)]
    #[schemars(title = "Early stopping policy")]
    pub early_stopping: EarlyStoppingPolicy,

    #[serde(default)]
    #[schemars(title = "Training accuracy probe")]
    pub training_probe: ProbeChoice,

    #[serde(default)]
    #[schemars(
        title = "Vector fill policy",
        description = "How short feature vectors are completed at prediction time."
    )]
    pub vector_fill: VectorFillPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            train_file: default_train_file(),
            test_file: default_test_file(),
            validation_fraction: default_validation_fraction(),
            seed: default_seed(),
            oversampling: default_oversampling(),
            smote_k_neighbors: default_smote_neighbors(),
            model_kind: ModelKind::default(),
            tree: TreeParams::default(),
            tree_stages: default_tree_stages(),
            early_stopping: EarlyStoppingPolicy::default(),
            training_probe: ProbeChoice::default(),
            vector_fill: VectorFillPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(ConfigError::InvalidParameter(format!(
                "validation_fraction must be in [0, 1), got {}",
                self.validation_fraction
            )));
        }
        if self.tree_stages.is_empty() {
            return Err(ConfigError::InvalidParameter("tree_stages must not be empty".into()));
        }
        if let ProbeChoice::NoisyLabel(p) = &self.training_probe {
            if !(0.0..=1.0).contains(&p.label_noise) {
                return Err(ConfigError::InvalidParameter(format!(
                    "label_noise must be in [0, 1], got {}",
                    p.label_noise
                )));
            }
            if !(p.feature_noise_std.is_finite() && p.feature_noise_std >= 0.0) {
                return Err(ConfigError::InvalidParameter(format!(
                    "feature_noise_std must be finite and non-negative, got {}",
                    p.feature_noise_std
                )));
            }
        }
        Ok(())
    }

    pub fn train_path(&self) -> PathBuf {
        self.data_dir.join(&self.train_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.data_dir.join(&self.test_file)
    }

    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn schema() -> Schema {
        schema_for!(PipelineConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::MaxFeatures;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_mirror_reference_deployment() {
        let c = PipelineConfig::default();
        assert_eq!(c.tree_stages, vec![100, 200, 300]);
        assert_eq!(c.tree.max_depth, Some(10));
        assert_eq!(c.tree.min_samples_leaf, 8);
        assert_eq!(c.tree.min_samples_split, 12);
        assert_eq!(c.tree.max_features, MaxFeatures::Sqrt);
        assert_eq!(c.model_kind, ModelKind::Balanced);
        assert_eq!(c.early_stopping, EarlyStoppingPolicy::KeepLast);
        assert_eq!(c.vector_fill, VectorFillPolicy::PadZero);
        assert_eq!(c.train_path(), PathBuf::from("./Blood_sample_dataset_balanced.csv"));
    }

    #[test]
    fn loads_partial_json_with_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"data_dir": "/srv/data", "model_kind": "Standard",
                "early_stopping": "rollback-to-best",
                "training_probe": {{"type": "clean", "params": {{}}}},
                "tree": {{"max_depth": null}}}}"#
        )
        .unwrap();
        let c = PipelineConfig::from_json_file(f.path()).unwrap();
        assert_eq!(c.model_kind, ModelKind::Standard);
        assert_eq!(c.early_stopping, EarlyStoppingPolicy::RollbackToBest);
        assert_eq!(c.training_probe, ProbeChoice::Clean(NoParams {}));
        assert_eq!(c.tree.max_depth, None);
        assert_eq!(c.tree.min_samples_leaf, 8);
        assert_eq!(c.test_path(), PathBuf::from("/srv/data/blood_samples_dataset_test.csv"));
    }

    #[test]
    fn rejects_bad_files_and_values() {
        assert!(matches!(
            PipelineConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));

        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(f.path()),
            Err(ConfigError::Json { .. })
        ));

        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"validation_fraction": 1.5}}"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(f.path()),
            Err(ConfigError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_noise() {
        let noisy = |label_noise, feature_noise_std| PipelineConfig {
            training_probe: ProbeChoice::NoisyLabel(NoisyLabelParams {
                label_noise,
                feature_noise_std,
                seed: 1,
            }),
            ..PipelineConfig::default()
        };
        assert!(noisy(0.0, 0.0).validate().is_ok());
        assert!(noisy(1.0, 0.5).validate().is_ok());
        for (label, feature) in [(-0.1, 0.03), (1.5, 0.03), (0.2, -1.0), (0.2, f64::NAN)] {
            assert!(
                matches!(noisy(label, feature).validate(), Err(ConfigError::InvalidParameter(_))),
                "{label} {feature}"
            );
        }
    }

    #[test]
    fn probe_choice_builds_probe() {
        let probe: Box<dyn TrainingAccuracyProbe> = (&ProbeChoice::default()).into();
        assert_eq!(probe.name(), "noisy-label");
        let probe: Box<dyn TrainingAccuracyProbe> = (&ProbeChoice::Clean(NoParams {})).into();
        assert_eq!(probe.name(), "clean");
    }

    #[test]
    fn probe_kind_names_match_probe_names() {
        for choice in [ProbeChoice::default(), ProbeChoice::Clean(NoParams {})] {
            let probe: Box<dyn TrainingAccuracyProbe> = (&choice).into();
            assert_eq!(ProbeKind::from(&choice).to_string(), probe.name());
        }
    }

    #[test]
    fn schema_lists_fields() {
        let schema = serde_json::to_value(PipelineConfig::schema()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("tree_stages"));
        assert!(props.contains_key("vector_fill"));
    }
}
