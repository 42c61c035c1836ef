// src/data_input/log_table.rs

/// A single named column of the log. Missing or unparseable cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Column-oriented view of a blackbox CSV log.
/// All columns have the same length (`row_count`).
#[derive(Debug, Clone, Default)]
pub struct LogTable {
    columns: Vec<LogColumn>,
    row_count: usize,
    metadata: Vec<(String, String)>, // Key-value pairs found before the CSV header
}

impl LogTable {
    /// Builds a table from the header names and row-major data.
    /// Rows shorter than the header are padded with `None`, extra cells are dropped.
    pub fn from_rows(
        names: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
        metadata: Vec<(String, String)>,
    ) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<LogColumn> = names
            .into_iter()
            .map(|name| LogColumn {
                name: name.trim().to_string(),
                values: Vec::with_capacity(row_count),
            })
            .collect();

        for row in &rows {
            for (col_idx, column) in columns.iter_mut().enumerate() {
                column.values.push(row.get(col_idx).copied().flatten());
            }
        }

        Self {
            columns,
            row_count,
            metadata,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[LogColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&LogColumn> {
        self.columns.get(index)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of a column, or an empty slice for an unknown index
    pub fn values(&self, index: usize) -> &[Option<f64>] {
        self.columns
            .get(index)
            .map(|c| c.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_transposes_and_trims_names() {
        let table = LogTable::from_rows(
            vec![" time ".to_string(), "gyroADC[0]".to_string()],
            vec![
                vec![Some(0.0), Some(1.5)],
                vec![Some(125.0)], // short row
            ],
            Vec::new(),
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["time", "gyroADC[0]"]);
        assert_eq!(table.values(0), &[Some(0.0), Some(125.0)]);
        assert_eq!(table.values(1), &[Some(1.5), None]);
        assert!(table.values(7).is_empty());
    }
}
