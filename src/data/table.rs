use crate::data::DataError;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// A typed column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Types a column: numeric when every non-empty cell parses as `f64`.
    /// A literal `NaN` cell counts as missing.
    pub fn from_cells(cells: Vec<Option<String>>) -> Column {
        let parsed: Option<Vec<Option<f64>>> = cells
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(text) => text.parse::<f64>().ok().map(|x| (!x.is_nan()).then_some(x)),
            })
            .collect();
        match parsed {
            Some(values) => Column::Numeric(values),
            None => Column::Categorical(cells),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match self {
            Column::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Categorical(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Cells rendered as text, numeric cells included.
    pub fn as_text(&self) -> Vec<Option<String>> {
        match self {
            Column::Numeric(v) => v.iter().map(|c| c.map(|x| x.to_string())).collect(),
            Column::Categorical(v) => v.clone(),
        }
    }
}

/// A named CSV table with trimmed headers and typed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl RawTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RawTable, DataError> {
        let path = path.as_ref();
        log::info!("Loading table from {}", path.display());
        let file = std::fs::File::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file)
    }

    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<RawTable, DataError> {
        let name = name.into();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        Self::from_rows(name, headers, rows)
    }

    /// Builds a table from string cells. Empty cells (after trimming) are missing.
    pub fn from_rows<H, S>(
        name: impl Into<String>,
        headers: Vec<H>,
        rows: Vec<Vec<S>>,
    ) -> Result<RawTable, DataError>
    where
        H: AsRef<str>,
        S: AsRef<str>,
    {
        let name = name.into();
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();
        let width = headers.len();

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); width];
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DataError::RaggedRow {
                    table: name,
                    row: row_index + 1,
                    found: row.len(),
                    expected: width,
                });
            }
            for (col, cell) in row.iter().enumerate() {
                let text = cell.as_ref().trim();
                cells[col].push(if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                });
            }
        }

        Ok(RawTable {
            name,
            headers,
            columns: cells.into_iter().map(Column::from_cells).collect(),
            n_rows: rows.len(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.headers.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = (&str, &mut Column)> {
        self.headers.iter().map(String::as_str).zip(self.columns.iter_mut())
    }

    pub fn require_columns<'a, I>(&self, names: I) -> Result<(), DataError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if self.column_index(name).is_none() {
                return Err(DataError::MissingColumn {
                    table: self.name.clone(),
                    column: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_trims_headers_and_types_columns() {
        let csv = " Glucose ,Disease, Note\n90, Healthy ,a\n,Diabetes,\n250.5,Diabetes,c\n";
        let t = RawTable::from_reader("t", csv.as_bytes()).unwrap();
        assert_eq!(t.headers(), &["Glucose", "Disease", "Note"]);
        assert_eq!(t.n_rows(), 3);
        assert_eq!(
            t.column("Glucose"),
            Some(&Column::Numeric(vec![Some(90.0), None, Some(250.5)]))
        );
        match t.column("Note").unwrap() {
            Column::Categorical(v) => assert_eq!(v[1], None),
            other => panic!("expected categorical, got {other:?}"),
        }
    }

    #[test]
    fn mixed_text_makes_column_categorical() {
        let t = RawTable::from_rows("t", vec!["x"], vec![vec!["1"], vec!["n/a"]]).unwrap();
        assert!(matches!(t.column("x"), Some(Column::Categorical(_))));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = RawTable::from_rows("t", vec!["a", "b"], vec![vec!["1"]]).unwrap_err();
        assert!(matches!(err, DataError::RaggedRow { row: 1, found: 1, expected: 2, .. }));
    }

    #[test]
    fn require_columns_names_the_missing_one() {
        let t = RawTable::from_rows("train", vec!["Glucose"], vec![vec!["1"]]).unwrap();
        let err = t.require_columns(["Glucose", "Disease"]).unwrap_err();
        match err {
            DataError::MissingColumn { table, column } => {
                assert_eq!(table, "train");
                assert_eq!(column, "Disease");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
