mod error;
pub mod input;
mod record;
mod service;
mod status;

pub use error::PredictError;
pub use input::{FeatureInput, FeatureValue, VectorFillPolicy, resolve_features};
pub use record::PredictionRecord;
pub use service::DiseasePredictor;
pub use status::{ModelHealth, ModelStats, PredictorState};
