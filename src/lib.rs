pub mod classifiers;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod pipeline;
pub mod predictor;
pub mod preprocessing;
pub mod tasks;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
