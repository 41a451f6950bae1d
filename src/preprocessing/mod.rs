mod standard_scaler;

pub use standard_scaler::{FeatureStatistics, ScalerError, StandardScaler};
