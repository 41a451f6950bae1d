mod random_forest;
pub mod sampling;

pub use random_forest::{RandomForest, tree_rng};
pub use sampling::ModelKind;
