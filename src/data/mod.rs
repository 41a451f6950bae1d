mod error;
pub mod imputation;
pub mod oversampling;
pub mod preparation;
pub mod split;
pub mod table;

pub use error::DataError;
pub use oversampling::{OversamplingError, Smote};
pub use preparation::{Partition, PreparedDataset, SplitOptions, extract_partition, prepare};
pub use table::{Column, RawTable};
