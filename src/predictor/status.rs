use crate::classifiers::ModelKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum PredictorState {
    Uninitialized,
    Fitting,
    Ready,
    DummyReady,
}

/// Whether predictions come from a real model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ModelHealth {
    NotFitted,
    Healthy,
    Degraded { reason: String },
}

impl ModelHealth {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ModelHealth::Degraded { .. })
    }
}

/// What a stats endpoint reports about the current model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub accuracy: f64,
    pub model_kind: ModelKind,
    pub state: PredictorState,
    pub health: ModelHealth,
    pub trees: usize,
    pub classes: Vec<String>,
    pub trained_at: Option<DateTime<Utc>>,
}
