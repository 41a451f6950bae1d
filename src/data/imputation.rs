use crate::data::table::{Column, RawTable};
use std::collections::BTreeMap;

/// Cells filled in one column by [`impute_missing`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFill {
    pub column: String,
    pub filled: usize,
}

/// Mean of the observed cells, `None` when nothing was observed.
pub fn column_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Most frequent observed value. Ties go to the lexicographically smallest.
pub fn column_mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values.iter().flatten() {
        *counts.entry(v.as_str()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.to_string())
}

/// Fills every missing cell of `table`, column by column: numeric columns
/// with their mean, categorical columns with their mode.
///
/// Statistics come from the table itself, so train and test tables are
/// imputed independently. Columns with no observed value stay missing.
pub fn impute_missing(table: &mut RawTable) -> Vec<ColumnFill> {
    let table_name = table.name().to_string();
    let mut fills = Vec::new();

    for (name, column) in table.columns_mut() {
        let missing = column.missing_count();
        if missing == 0 {
            continue;
        }
        let filled = match column {
            Column::Numeric(values) => match column_mean(values) {
                Some(mean) => {
                    values.iter_mut().filter(|v| v.is_none()).for_each(|v| *v = Some(mean));
                    missing
                }
                None => 0,
            },
            Column::Categorical(values) => match column_mode(values) {
                Some(mode) => {
                    values
                        .iter_mut()
                        .filter(|v| v.is_none())
                        .for_each(|v| *v = Some(mode.clone()));
                    missing
                }
                None => 0,
            },
        };
        if filled > 0 {
            log::debug!("{table_name}: imputed {filled} missing cells in '{name}'");
            fills.push(ColumnFill {
                column: name.to_string(),
                filled,
            });
        } else {
            log::warn!("{table_name}: column '{name}' has no observed values, left missing");
        }
    }
    fills
}
