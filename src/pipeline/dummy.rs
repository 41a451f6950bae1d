use crate::classifiers::{MaxFeatures, ModelKind, RandomForest, TreeParams};
use crate::core::{FeatureSchema, LABEL_COLUMN, LabelVocabulary};
use crate::pipeline::bundle::{BundleOrigin, ModelBundle};
use crate::pipeline::error::FitError;
use crate::preprocessing::FeatureStatistics;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DUMMY_CLASSES: [&str; 5] = ["Healthy", "Diabetes", "Anemia", "Thalasse", "Thromboc"];
const DUMMY_ROWS: usize = 100;
const DUMMY_TREES: usize = 10;
const DUMMY_FILL_VALUE: f64 = 500.0;
const DUMMY_SEED: u64 = 42;

/// Fallback bundle trained on uniform noise in `[0, 1000)`.
///
/// Keeps the predictor answering when no real model can be fitted. The
/// schema matches the real one, so every valid input shape still resolves;
/// the predicted labels are meaningless.
pub fn dummy_bundle(schema: &FeatureSchema) -> Result<ModelBundle, FitError> {
    let mut rng = StdRng::seed_from_u64(DUMMY_SEED);
    let width = schema.len();
    let rows: Vec<Vec<f64>> = (0..DUMMY_ROWS)
        .map(|_| (0..width).map(|_| rng.random::<f64>() * 1000.0).collect())
        .collect();
    let codes: Vec<usize> = (0..DUMMY_ROWS)
        .map(|_| rng.random_range(0..DUMMY_CLASSES.len()))
        .collect();

    let vocabulary = LabelVocabulary::with_values(
        LABEL_COLUMN,
        DUMMY_CLASSES.iter().map(|c| c.to_string()).collect(),
    );
    let statistics =
        FeatureStatistics::fit(&rows)?.with_fill_values(vec![DUMMY_FILL_VALUE; width]);

    let params = TreeParams {
        max_depth: None,
        min_samples_leaf: 1,
        min_samples_split: 2,
        max_features: MaxFeatures::Sqrt,
    };
    let mut forest = RandomForest::new(ModelKind::Standard, params, DUMMY_SEED, DUMMY_CLASSES.len());
    forest.grow_to(&statistics.scaler().transform(&rows), &codes, DUMMY_TREES);

    Ok(ModelBundle {
        schema: schema.clone(),
        vocabulary,
        statistics,
        forest,
        origin: BundleOrigin::Dummy,
        test_accuracy: 0.0,
        trained_at: Utc::now(),
    })
}
