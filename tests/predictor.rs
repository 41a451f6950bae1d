mod common;

use common::{PLACEHOLDER, fast_config, placeholder_row, write_panel_dataset, write_panel_rows};
use hemalyze::core::schema::BLOOD_PANEL_FEATURES;
use hemalyze::pipeline::PipelineConfig;
use hemalyze::predictor::{
    DiseasePredictor, FeatureInput, FeatureValue, ModelHealth, PredictError, PredictorState,
    VectorFillPolicy,
};
use std::path::Path;

fn ready_predictor(dir: &Path, fill: VectorFillPolicy) -> DiseasePredictor {
    let config = PipelineConfig {
        vector_fill: fill,
        ..fast_config(dir)
    };
    write_panel_dataset(&config).unwrap();
    let predictor = DiseasePredictor::new(config);
    assert!(predictor.fit().is_success());
    predictor
}

#[test]
fn high_glucose_and_hba1c_predict_diabetes() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fast_config(dir.path());
    config.tree_stages = vec![10];
    write_panel_rows(
        &config.train_path(),
        &[
            placeholder_row(&[("Glucose", 250.0), ("HbA1c", 9.0)], "Diabetes"),
            placeholder_row(&[("Glucose", 90.0), ("HbA1c", 5.0)], "Healthy"),
        ],
    )
    .unwrap();

    let predictor = DiseasePredictor::new(config);
    let input = FeatureInput::map([("glucose", "250"), ("hba1c", "9.0")]);
    assert_eq!(predictor.predict(&input).unwrap(), "Diabetes");
    assert_eq!(predictor.state(), PredictorState::Ready);

    let healthy = FeatureInput::map([("Glucose", 90.0), ("HbA1c", 5.0)]);
    assert_eq!(predictor.predict(&healthy).unwrap(), "Healthy");
}

#[test]
fn absent_features_behave_like_training_means() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::PadMean);
    let bundle = predictor.bundle().unwrap();
    let means = bundle.statistics.means().to_vec();

    let explicit = FeatureInput::map(BLOOD_PANEL_FEATURES.iter().copied().zip(means.iter().copied()));
    let expected = predictor.predict(&explicit).unwrap();

    assert_eq!(predictor.predict(&FeatureInput::map(Vec::<(&str, f64)>::new())).unwrap(), expected);
    assert_eq!(predictor.predict_json("{}").unwrap(), expected);
    assert_eq!(predictor.predict(&FeatureInput::Vector(vec![])).unwrap(), expected);
}

#[test]
fn unusable_values_fall_back_to_means() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::PadZero);
    let expected = predictor.predict_json("{}").unwrap();
    let garbage = r#"{"Glucose": "", "HbA1c": "n/a", "ALT": null, "BMI": true, "AST": [1]}"#;
    assert_eq!(predictor.predict_json(garbage).unwrap(), expected);
}

#[test]
fn loosely_spelled_names_resolve_to_the_same_feature() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::PadZero);
    for v in [0.0, 240.0, 480.0, 720.0, 1e6] {
        let exact = FeatureInput::map([("C-reactive Protein", v)]);
        for alias in ["c_reactive_protein", "c reactive protein"] {
            let loose = FeatureInput::map([(alias, v)]);
            assert_eq!(
                predictor.predict(&exact).unwrap(),
                predictor.predict(&loose).unwrap(),
                "{alias} = {v}"
            );
        }
    }
}

#[test]
fn exact_name_outranks_normalized_alias() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::PadZero);
    let centre = |c: f64| -> Vec<(String, FeatureValue)> {
        BLOOD_PANEL_FEATURES
            .iter()
            .enumerate()
            .map(|(j, n)| (n.to_string(), FeatureValue::Number((j as f64 + 1.0) * 10.0 * c)))
            .collect()
    };
    let mut entries = centre(1.0);
    entries.extend(centre(3.0).into_iter().map(|(n, v)| {
        (hemalyze::core::attributes::normalize_feature_name(&n), v)
    }));
    let input = FeatureInput::Map(entries.into_iter().collect());
    assert_eq!(predictor.predict(&input).unwrap(), "Anemia");
}

#[test]
fn repeated_calls_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    write_panel_dataset(&config).unwrap();
    let input = FeatureInput::map([("Glucose", 25.0), ("Hemoglobin", 61.0), ("Troponin", 400.0)]);

    let first = DiseasePredictor::new(config.clone());
    let second = DiseasePredictor::new(config);
    let label = first.predict(&input).unwrap();
    assert_eq!(first.predict(&input).unwrap(), label);
    assert_eq!(second.predict(&input).unwrap(), label);
}

#[test]
fn short_vectors_are_padded_with_zeros() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::PadZero);
    let short: Vec<f64> = (0..10).map(|j| (j as f64 + 1.0) * 20.0).collect();
    let mut padded = short.clone();
    padded.resize(24, 0.0);
    assert_eq!(
        predictor.predict(&FeatureInput::Vector(short)).unwrap(),
        predictor.predict(&FeatureInput::Vector(padded.clone())).unwrap()
    );

    let mut long = padded.clone();
    long.extend([9e9; 6]);
    assert_eq!(
        predictor.predict(&FeatureInput::Vector(long)).unwrap(),
        predictor.predict(&FeatureInput::Vector(padded)).unwrap()
    );
}

#[test]
fn wrong_length_vectors_can_be_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ready_predictor(dir.path(), VectorFillPolicy::Reject);
    assert_eq!(
        predictor.predict(&FeatureInput::Vector(vec![1.0; 10])),
        Err(PredictError::FeatureCount {
            found: 10,
            expected: 24
        })
    );
    assert!(predictor.predict(&FeatureInput::Vector(vec![1.0; 24])).is_ok());
}

#[test]
fn missing_dataset_still_serves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = DiseasePredictor::new(fast_config(dir.path()));

    assert!(predictor.predict_json(r#"{"Glucose": 120}"#).is_ok());
    assert!(predictor.predict_json("[1, 2, 3]").is_ok());
    assert!(predictor.predict_json("{}").is_ok());
    assert_eq!(predictor.state(), PredictorState::DummyReady);
    assert!(matches!(predictor.health(), ModelHealth::Degraded { .. }));

    let stats = predictor.stats();
    assert_eq!(stats.accuracy, 0.0);
    assert_eq!(stats.classes.len(), 5);
}

#[test]
fn corrupted_dataset_still_serves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    std::fs::write(config.train_path(), "Glucose,Disease\n1,Healthy\n").unwrap();

    let predictor = DiseasePredictor::new(config);
    assert!(!predictor.fit().is_success());
    assert!(predictor.predict(&FeatureInput::map([("Glucose", PLACEHOLDER)])).is_ok());
}

#[test]
fn unparseable_payloads_are_structural_errors() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = DiseasePredictor::new(fast_config(dir.path()));
    for bad in ["not json", "42", "\"text\"", "[1, \"a\"]"] {
        assert!(
            matches!(predictor.predict_json(bad), Err(PredictError::MalformedPayload(_))),
            "{bad}"
        );
    }
}
