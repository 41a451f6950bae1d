use crate::core::FeatureSchema;
use crate::pipeline::{
    BundleOrigin, FitError, FitResult, ModelBundle, PipelineConfig, dummy_bundle, fit_pipeline,
};
use crate::predictor::input::{FeatureInput, resolve_features};
use crate::predictor::status::{ModelHealth, ModelStats, PredictorState};
use crate::predictor::{PredictError, PredictionRecord};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

struct Slot {
    bundle: Option<Arc<ModelBundle>>,
    state: PredictorState,
    health: ModelHealth,
}

/// Disease prediction service over one swappable model bundle.
///
/// Readers clone the current `Arc<ModelBundle>` under a short read lock and
/// predict without holding it. A fit runs outside the slot lock and
/// publishes its bundle in a single write, so a reader sees either the old
/// or the new bundle, never a mix. Fits are serialized among themselves.
pub struct DiseasePredictor {
    config: PipelineConfig,
    schema: FeatureSchema,
    slot: RwLock<Slot>,
    fit_guard: Mutex<()>,
}

impl DiseasePredictor {
    /// A predictor with no model yet; the first prediction fits one.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            schema: FeatureSchema::blood_panel(),
            slot: RwLock::new(Slot {
                bundle: None,
                state: PredictorState::Uninitialized,
                health: ModelHealth::NotFitted,
            }),
            fit_guard: Mutex::new(()),
        }
    }

    /// Serves an already built bundle, e.g. one from [`fit_tables`](crate::pipeline::fit_tables).
    /// A dummy bundle is served as degraded.
    pub fn with_bundle(config: PipelineConfig, bundle: Arc<ModelBundle>) -> Self {
        let predictor = Self::new(config);
        let (state, health) = match bundle.origin {
            BundleOrigin::Trained => (PredictorState::Ready, ModelHealth::Healthy),
            BundleOrigin::Dummy => (
                PredictorState::DummyReady,
                ModelHealth::Degraded {
                    reason: "serving a supplied dummy model".into(),
                },
            ),
        };
        predictor.publish(bundle, state, health);
        predictor
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Runs a fit pass and publishes its bundle, or the dummy bundle when
    /// the fit fails. The returned result is the fit's own outcome.
    pub fn fit(&self) -> FitResult {
        let _fitting = self.fit_guard.lock();
        self.fit_locked()
    }

    fn fit_locked(&self) -> FitResult {
        self.set_state(PredictorState::Fitting);
        log::info!("Fitting model from {}", self.config.train_path().display());

        let result = fit_pipeline(&self.config);
        match &result {
            FitResult::Success(report) => {
                self.publish(Arc::clone(&report.bundle), PredictorState::Ready, ModelHealth::Healthy);
            }
            FitResult::Failed(err) => self.fall_back(err),
        }
        result
    }

    /// Explicit retrain. Predictions keep using the previous bundle until
    /// the new one is published.
    pub fn reload(&self) -> FitResult {
        self.fit()
    }

    pub fn state(&self) -> PredictorState {
        self.read_slot().state
    }

    pub fn health(&self) -> ModelHealth {
        self.read_slot().health.clone()
    }

    /// Current bundle, if one has been published.
    pub fn bundle(&self) -> Option<Arc<ModelBundle>> {
        self.read_slot().bundle.clone()
    }

    pub fn predict(&self, input: &FeatureInput) -> Result<String, PredictError> {
        let bundle = self.bundle_or_fit()?;
        let row = resolve_features(input, &bundle.schema, &bundle.statistics, self.config.vector_fill)?;
        Ok(bundle.classify(&row)?.to_string())
    }

    pub fn predict_json(&self, payload: &str) -> Result<String, PredictError> {
        self.predict(&FeatureInput::from_json(payload)?)
    }

    pub fn predict_record(&self, input: FeatureInput) -> Result<PredictionRecord, PredictError> {
        let label = self.predict(&input)?;
        Ok(PredictionRecord::new(input, label))
    }

    /// Does not trigger a fit.
    pub fn stats(&self) -> ModelStats {
        let slot = self.read_slot();
        let bundle = slot.bundle.as_deref();
        ModelStats {
            accuracy: bundle.map_or(0.0, |b| b.test_accuracy),
            model_kind: bundle.map_or(self.config.model_kind, ModelBundle::model_kind),
            state: slot.state,
            health: slot.health.clone(),
            trees: bundle.map_or(0, |b| b.forest.n_trees()),
            classes: bundle.map_or_else(Vec::new, |b| b.vocabulary.values().to_vec()),
            trained_at: bundle.map(|b| b.trained_at),
        }
    }

    fn bundle_or_fit(&self) -> Result<Arc<ModelBundle>, PredictError> {
        if let Some(bundle) = self.bundle() {
            return Ok(bundle);
        }
        let _fitting = self.fit_guard.lock();
        // Another caller may have fitted while this one waited.
        if let Some(bundle) = self.bundle() {
            return Ok(bundle);
        }
        log::info!("No model loaded; fitting on first prediction");
        let _ = self.fit_locked();
        self.bundle().ok_or_else(|| {
            PredictError::ModelUnavailable(match self.health() {
                ModelHealth::Degraded { reason } => reason,
                other => format!("{other:?}"),
            })
        })
    }

    fn fall_back(&self, err: &FitError) {
        log::warn!("Fit failed ({err}); serving the dummy model");
        let reason = err.to_string();
        match dummy_bundle(&self.schema) {
            Ok(dummy) => self.publish(
                Arc::new(dummy),
                PredictorState::DummyReady,
                ModelHealth::Degraded { reason },
            ),
            Err(dummy_err) => {
                log::error!("Dummy model could not be built: {dummy_err}");
                let mut slot = self.write_slot();
                let serving = slot.bundle.as_deref().map(|b| b.origin);
                slot.state = match serving {
                    Some(BundleOrigin::Trained) => PredictorState::Ready,
                    Some(BundleOrigin::Dummy) => PredictorState::DummyReady,
                    None => PredictorState::Uninitialized,
                };
                slot.health = ModelHealth::Degraded {
                    reason: format!("{reason}; dummy model failed: {dummy_err}"),
                };
            }
        }
    }

    fn publish(&self, bundle: Arc<ModelBundle>, state: PredictorState, health: ModelHealth) {
        let mut slot = self.write_slot();
        slot.bundle = Some(bundle);
        slot.state = state;
        slot.health = health;
    }

    fn set_state(&self, state: PredictorState) {
        self.write_slot().state = state;
    }

    fn read_slot(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read()
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::BLOOD_PANEL_FEATURES;
    use crate::testing::{fast_config, write_panel_dataset};
    use std::path::Path;
    use std::thread;

    fn write_data(dir: &Path) -> PipelineConfig {
        let config = fast_config(dir);
        write_panel_dataset(&config).unwrap();
        config
    }

    fn class_centre(class: usize) -> FeatureInput {
        FeatureInput::Vector(
            (0..BLOOD_PANEL_FEATURES.len())
                .map(|j| (j as f64 + 1.0) * 10.0 * (class as f64 + 1.0))
                .collect(),
        )
    }

    #[test]
    fn first_prediction_fits_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(write_data(dir.path()));
        assert_eq!(predictor.state(), PredictorState::Uninitialized);
        assert_eq!(predictor.stats().trees, 0);

        assert_eq!(predictor.predict(&class_centre(1)).unwrap(), "Diabetes");
        assert_eq!(predictor.state(), PredictorState::Ready);
        assert_eq!(predictor.health(), ModelHealth::Healthy);

        let stats = predictor.stats();
        assert_eq!(stats.trees, 10);
        assert_eq!(stats.classes, vec!["Anemia", "Diabetes", "Healthy"]);
        assert!(stats.accuracy > 0.9);
        assert!(stats.trained_at.is_some());
    }

    #[test]
    fn missing_data_degrades_to_dummy_model() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(fast_config(dir.path()));

        assert!(!predictor.fit().is_success());
        assert_eq!(predictor.state(), PredictorState::DummyReady);
        assert!(predictor.health().is_degraded());
        assert_eq!(predictor.bundle().unwrap().origin, BundleOrigin::Dummy);

        let label = predictor.predict(&FeatureInput::map([("Glucose", 120.0)])).unwrap();
        assert!(crate::pipeline::dummy::DUMMY_CLASSES.contains(&label.as_str()));
        assert_eq!(predictor.stats().accuracy, 0.0);
    }

    #[test]
    fn reload_recovers_once_data_appears() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let predictor = DiseasePredictor::new(config.clone());
        predictor.fit();
        assert_eq!(predictor.state(), PredictorState::DummyReady);

        write_data(dir.path());
        assert!(predictor.reload().is_success());
        assert_eq!(predictor.state(), PredictorState::Ready);
        assert_eq!(predictor.bundle().unwrap().origin, BundleOrigin::Trained);
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(write_data(dir.path()));
        let input = FeatureInput::from_json(r#"{"Glucose": 55, "hba1c": "61"}"#).unwrap();
        let first = predictor.predict(&input).unwrap();
        for _ in 0..5 {
            assert_eq!(predictor.predict(&input).unwrap(), first);
        }
    }

    #[test]
    fn predictions_survive_concurrent_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(write_data(dir.path()));
        predictor.fit();

        thread::scope(|s| {
            for class in 0..3 {
                let predictor = &predictor;
                s.spawn(move || {
                    let expected = ["Anemia", "Diabetes", "Healthy"][class];
                    for _ in 0..20 {
                        assert_eq!(predictor.predict(&class_centre(class)).unwrap(), expected);
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..2 {
                    assert!(predictor.reload().is_success());
                }
            });
        });
        assert_eq!(predictor.state(), PredictorState::Ready);
    }

    #[test]
    fn malformed_payload_is_reported_without_fitting() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(write_data(dir.path()));
        assert!(matches!(
            predictor.predict_json("\"glucose\""),
            Err(PredictError::MalformedPayload(_))
        ));
        assert_eq!(predictor.state(), PredictorState::Uninitialized);
    }

    #[test]
    fn supplied_bundle_state_follows_its_origin() {
        let dummy = Arc::new(dummy_bundle(&FeatureSchema::blood_panel()).unwrap());
        let predictor = DiseasePredictor::with_bundle(PipelineConfig::default(), dummy);
        assert_eq!(predictor.state(), PredictorState::DummyReady);
        assert!(predictor.health().is_degraded());

        let dir = tempfile::tempdir().unwrap();
        let report = fit_pipeline(&write_data(dir.path())).into_result().unwrap();
        let predictor = DiseasePredictor::with_bundle(PipelineConfig::default(), report.bundle);
        assert_eq!(predictor.state(), PredictorState::Ready);
        assert_eq!(predictor.health(), ModelHealth::Healthy);
    }

    #[test]
    fn record_carries_input_and_label() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = DiseasePredictor::new(write_data(dir.path()));
        let record = predictor.predict_record(class_centre(2)).unwrap();
        assert_eq!(record.label, "Healthy");
        assert_eq!(record.input, class_centre(2));
    }
}
