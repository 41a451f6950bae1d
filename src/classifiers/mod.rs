pub mod classifier;
mod conditional_tests;
pub mod decision_tree;
pub mod random_forest;

pub use classifier::{Classifier, argmax};
pub use decision_tree::{DecisionTree, MaxFeatures, TreeParams};
pub use random_forest::{ModelKind, RandomForest};
