pub mod bundle;
pub mod config;
pub mod dummy;
mod error;
pub mod fit;

pub use bundle::{BundleOrigin, FitReport, FitResult, ModelBundle, TestSample};
pub use config::{ConfigError, PipelineConfig, ProbeChoice, ProbeKind};
pub use dummy::dummy_bundle;
pub use error::FitError;
pub use fit::{fit_pipeline, fit_tables};
