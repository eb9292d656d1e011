use crate::schema::{Dataset, DatasetSchema};
use crate::{Error, Result};

/// An untyped table of text cells, as read from a source
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    dataset: Dataset,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table, checking that every row matches the header width
    pub fn new(dataset: Dataset, columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::RaggedRow {
                    dataset,
                    row: i,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { dataset, columns, rows })
    }

    /// Build a table from string literals, mostly useful in tests
    pub fn from_strs(dataset: Dataset, columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            dataset,
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Build a table from named columns of equal length
    pub fn from_columns(dataset: Dataset, columns: &[(&str, &[&str])]) -> Result<Self> {
        let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let names = columns.iter().map(|(n, _)| n.to_string()).collect();
        let mut rows = Vec::with_capacity(height);
        for i in 0..height {
            let row: Vec<String> = columns
                .iter()
                .filter_map(|(_, values)| values.get(i).map(|v| v.to_string()))
                .collect();
            rows.push(row);
        }
        Self::new(dataset, names, rows)
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Restrict and reorder the table to the declared columns of `schema`
    ///
    /// Extra columns are dropped. A declared column that is absent is an error.
    pub fn project(&self, schema: &DatasetSchema) -> Result<RawTable> {
        let indices = schema
            .columns
            .iter()
            .map(|spec| {
                self.column_index(spec.name).ok_or_else(|| Error::MissingColumn {
                    dataset: schema.dataset,
                    column: spec.name.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(RawTable {
            dataset: schema.dataset,
            columns: schema.column_names().map(str::to_string).collect(),
            rows,
        })
    }
}
