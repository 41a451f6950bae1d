mod attribute;
mod label_vocabulary;
mod numeric_attribute;

pub use attribute::Attribute;
pub use label_vocabulary::{LabelVocabulary, VocabularyError};
pub use numeric_attribute::{NumericAttribute, normalize_feature_name};
