use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// Accuracies measured after one growth stage of the forest.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StageSnapshot {
    pub stage: usize,
    pub trees: usize,
    pub train_accuracy: f64,
    pub validation_accuracy: f64,
    pub seconds: f64,
}

impl Display for StageSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "stage={}, trees={}, train_acc={:.6}, val_acc={:.6}, t={:.3}s",
            self.stage, self.trees, self.train_accuracy, self.validation_accuracy, self.seconds
        )
    }
}
