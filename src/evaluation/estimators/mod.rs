mod estimator;
mod weighted_mean;

pub use estimator::Estimator;
pub use weighted_mean::WeightedMean;
