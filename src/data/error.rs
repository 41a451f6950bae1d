use thiserror::Error;

/// Failures while loading or shaping the clinical tables.
///
/// Every variant is a configuration problem with the input data: the fit
/// that hit it cannot proceed and retrying without changing the data will
/// fail again.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("required column '{column}' was not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("table '{0}' contains no data rows")]
    EmptyTable(String),

    #[error("feature column '{0}' contains non-numeric values")]
    NonNumericFeature(String),

    #[error("column '{0}' has no observed values to impute from")]
    ColumnAllMissing(String),

    #[error("row {row} of table '{table}' has {found} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
