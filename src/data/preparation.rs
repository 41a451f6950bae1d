use crate::core::schema::{FeatureSchema, LABEL_COLUMN};
use crate::data::DataError;
use crate::data::imputation::impute_missing;
use crate::data::split::stratified_split;
use crate::data::table::{Column, RawTable};

/// Feature rows in schema order plus their trimmed labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<String>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn select(&self, indices: &[usize]) -> Partition {
        Partition {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}

/// Train / validation / test partitions of one preparation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    pub train: Partition,
    pub validation: Partition,
    pub test: Option<Partition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    pub validation_fraction: f64,
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            validation_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Imputes `table` in place and pulls the schema features and labels out of it.
///
/// Fails when the label or any schema feature is absent, when a feature
/// column is not numeric, when a required column could not be imputed, or
/// when the table has no rows.
pub fn extract_partition(table: &mut RawTable, schema: &FeatureSchema) -> Result<Partition, DataError> {
    table.require_columns(std::iter::once(LABEL_COLUMN).chain(schema.names()))?;
    if table.n_rows() == 0 {
        return Err(DataError::EmptyTable(table.name().to_string()));
    }

    impute_missing(table);

    let mut feature_columns: Vec<&[Option<f64>]> = Vec::with_capacity(schema.len());
    for name in schema.names() {
        match table.column(name) {
            Some(Column::Numeric(values)) => feature_columns.push(values),
            Some(Column::Categorical(_)) => {
                return Err(DataError::NonNumericFeature(name.to_string()));
            }
            None => {
                return Err(DataError::MissingColumn {
                    table: table.name().to_string(),
                    column: name.to_string(),
                });
            }
        }
    }

    let labels = table
        .column(LABEL_COLUMN)
        .map(Column::as_text)
        .unwrap_or_default();

    let mut partition = Partition::default();
    for row in 0..table.n_rows() {
        let mut values = Vec::with_capacity(schema.len());
        for (col, name) in feature_columns.iter().zip(schema.names()) {
            values.push(col[row].ok_or_else(|| DataError::ColumnAllMissing(name.to_string()))?);
        }
        let label = labels[row]
            .clone()
            .ok_or_else(|| DataError::ColumnAllMissing(LABEL_COLUMN.to_string()))?;
        partition.features.push(values);
        partition.labels.push(label);
    }
    Ok(partition)
}

/// Dataset preparation: impute each table on its own, then split the
/// training table into stratified train and validation partitions.
///
/// Imputation statistics are computed over the whole training table before
/// the split, so validation rows contribute to the train-side fill values.
pub fn prepare(
    mut raw_train: RawTable,
    raw_test: Option<RawTable>,
    schema: &FeatureSchema,
    options: SplitOptions,
) -> Result<PreparedDataset, DataError> {
    let full_train = extract_partition(&mut raw_train, schema)?;
    let test = match raw_test {
        Some(mut t) => Some(extract_partition(&mut t, schema)?),
        None => None,
    };

    let split = stratified_split(&full_train.labels, options.validation_fraction, options.seed);
    let train = full_train.select(&split.train);
    let validation = full_train.select(&split.validation);

    log::info!(
        "Prepared dataset: {} train, {} validation, {} test rows",
        train.len(),
        validation.len(),
        test.as_ref().map_or(0, Partition::len)
    );

    Ok(PreparedDataset {
        train,
        validation,
        test,
    })
}
