use crate::classifiers::RandomForest;
use crate::core::{FeatureSchema, LABEL_COLUMN, LabelVocabulary};
use crate::data::{Partition, RawTable, Smote, SplitOptions, prepare};
use crate::evaluation::{
    BasicClassificationEvaluator, Measurement, PerformanceEvaluator,
    PerformanceEvaluatorExt, TrainingAccuracyProbe, WeightedMean, evaluate_holdout,
};
use crate::pipeline::bundle::{BundleOrigin, FitReport, FitResult, ModelBundle, TestSample};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::FitError;
use crate::preprocessing::FeatureStatistics;
use crate::tasks::{LabelledRows, StagedTrainer};
use chrono::Utc;
use std::sync::Arc;

/// Number of test rows listed in a [`FitReport`].
pub const TEST_SAMPLES_LISTED: usize = 10;

/// Loads the configured tables and runs one complete fit pass.
pub fn fit_pipeline(config: &PipelineConfig) -> FitResult {
    load_and_fit(config).into()
}

fn load_and_fit(config: &PipelineConfig) -> Result<FitReport, FitError> {
    config.validate()?;
    let raw_train = RawTable::from_path(config.train_path())?;
    let test_path = config.test_path();
    let raw_test = if test_path.exists() {
        Some(RawTable::from_path(&test_path)?)
    } else {
        log::info!("No test table at {}; accuracy will be reported as 0", test_path.display());
        None
    };
    fit_tables(config, raw_train, raw_test)
}

/// Fits vocabulary, statistics and forest from already loaded tables.
///
/// Only the train partition feeds any fitted parameter. Validation rows
/// drive early stopping and test rows the reported accuracy.
pub fn fit_tables(
    config: &PipelineConfig,
    raw_train: RawTable,
    raw_test: Option<RawTable>,
) -> Result<FitReport, FitError> {
    config.validate()?;
    let schema = FeatureSchema::blood_panel();
    let dataset = prepare(
        raw_train,
        raw_test,
        &schema,
        SplitOptions {
            validation_fraction: config.validation_fraction,
            seed: config.seed,
        },
    )?;

    let vocabulary = LabelVocabulary::fit(LABEL_COLUMN, &dataset.train.labels)?;
    let statistics = FeatureStatistics::fit(&dataset.train.features)?;
    log::info!(
        "Fitted {} classes and statistics for {} features",
        vocabulary.len(),
        statistics.width()
    );

    let train_codes = vocabulary.encode_all(&dataset.train.labels)?;
    let validation_codes = vocabulary.encode_all(&dataset.validation.labels)?;

    let (train_rows, train_codes, oversampled) =
        oversample(config, &dataset.train.features, train_codes);

    let scaler = statistics.scaler();
    let train_scaled = scaler.transform(&train_rows);
    let validation_scaled = scaler.transform(&dataset.validation.features);

    let mut forest = RandomForest::new(
        config.model_kind,
        config.tree.clone(),
        config.seed,
        vocabulary.len(),
    );
    let probe: Box<dyn TrainingAccuracyProbe> = (&config.training_probe).into();
    let trainer = StagedTrainer::new(config.tree_stages.clone(), config.early_stopping, probe)
        .map_err(FitError::Stages)?;
    let outcome = trainer.run(
        &mut forest,
        LabelledRows {
            features: &train_scaled,
            labels: &train_codes,
        },
        LabelledRows {
            features: &validation_scaled,
            labels: &validation_codes,
        },
    );

    let mut test_accuracy = 0.0;
    let mut test_measurements = Vec::new();
    let mut test_samples = Vec::new();
    if let Some(test) = &dataset.test {
        let evaluation = evaluate_test(&forest, &vocabulary, &statistics, test)?;
        test_accuracy = evaluation.accuracy;
        test_measurements = evaluation.measurements;
        test_samples = evaluation.samples;
        log::info!("Model Accuracy: {:.2}%", test_accuracy * 100.0);
    }

    let mut feature_importances: Vec<(String, f64)> = schema
        .names()
        .map(str::to_string)
        .zip(forest.feature_importances())
        .collect();
    feature_importances.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(FitReport {
        test_accuracy,
        curve: outcome.curve,
        stopped_at_stage: outcome.stopped_at_stage,
        oversampled,
        train_rows: train_scaled.len(),
        validation_rows: validation_scaled.len(),
        test_rows: dataset.test.as_ref().map_or(0, Partition::len),
        test_measurements,
        test_samples,
        feature_importances,
        bundle: Arc::new(ModelBundle {
            schema,
            vocabulary,
            statistics,
            forest,
            origin: BundleOrigin::Trained,
            test_accuracy,
            trained_at: Utc::now(),
        }),
    })
}

/// SMOTE on the raw train rows; falls back to the original rows when a
/// class is too small to synthesize from.
fn oversample(
    config: &PipelineConfig,
    rows: &[Vec<f64>],
    codes: Vec<usize>,
) -> (Vec<Vec<f64>>, Vec<usize>, bool) {
    if !config.oversampling {
        return (rows.to_vec(), codes, false);
    }
    match Smote::new(config.smote_k_neighbors, config.seed).fit_resample(rows, &codes) {
        Ok((rows, codes)) => {
            log::info!("SMOTE applied: training set balanced to {} rows", rows.len());
            (rows, codes, true)
        }
        Err(err) => {
            log::warn!("SMOTE not applied: {err}");
            (rows.to_vec(), codes, false)
        }
    }
}

struct TestEvaluation {
    accuracy: f64,
    measurements: Vec<Measurement>,
    samples: Vec<TestSample>,
}

fn evaluate_test(
    forest: &RandomForest,
    vocabulary: &LabelVocabulary,
    statistics: &FeatureStatistics,
    test: &Partition,
) -> Result<TestEvaluation, FitError> {
    let codes = vocabulary.encode_all(&test.labels)?;
    let scaled = statistics.scaler().transform(&test.features);

    let mut evaluator = BasicClassificationEvaluator::<WeightedMean>::full_report(vocabulary.len());
    evaluate_holdout(forest, &scaled, &codes, &mut evaluator);
    let accuracy = evaluator.metric("accuracy").unwrap_or(0.0);

    let mut samples = Vec::new();
    for (row, label) in scaled.iter().zip(&test.labels).take(TEST_SAMPLES_LISTED) {
        let predicted = forest.predict_row(row).unwrap_or(0);
        samples.push(TestSample {
            actual: label.clone(),
            predicted: vocabulary.decode(predicted)?.to_string(),
        });
    }

    Ok(TestEvaluation {
        accuracy,
        measurements: evaluator.performance(),
        samples,
    })
}
