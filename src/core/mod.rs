pub mod attributes;
pub mod instances;
pub mod schema;

pub use attributes::{LabelVocabulary, VocabularyError};
pub use schema::{FeatureSchema, LABEL_COLUMN};
