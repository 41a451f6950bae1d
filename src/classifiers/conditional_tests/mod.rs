mod attribute_split_suggestion;

pub use attribute_split_suggestion::AttributeSplitSuggestion;
