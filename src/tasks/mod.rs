pub mod staged_training;

pub use staged_training::{EarlyStoppingPolicy, LabelledRows, StagedOutcome, StagedTrainer};
