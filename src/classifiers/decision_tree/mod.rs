mod decision_tree;
pub mod instance_conditional_test;
pub mod nodes;
pub mod split_criteria;
mod tree_params;

pub use decision_tree::{DecisionTree, TrainingView};
pub use instance_conditional_test::{InstanceConditionalTest, NumericAttributeBinaryTest};
pub use split_criteria::{GiniSplitCriterion, SplitCriterion};
pub use tree_params::{MaxFeatures, MaxFeaturesKind, TreeParams};
