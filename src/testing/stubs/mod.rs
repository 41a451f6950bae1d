pub mod scripted_driver;
pub mod threshold_classifier;

pub use scripted_driver::ScriptedDriver;
pub use threshold_classifier::ThresholdClassifier;
