use crate::schema::{Dataset, FieldKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A cell could not be converted to its declared type after fixups.
    /// `row` is the zero-based data row index in the input table.
    #[error("Malformed input in {dataset}.{column} at row {row}: {value:?} is not a valid {expected}")]
    MalformedInput {
        dataset: Dataset,
        column: String,
        row: usize,
        value: String,
        expected: FieldKind,
    },

    #[error("Missing column in {dataset} input: {column}")]
    MissingColumn { dataset: Dataset, column: String },

    #[error("Row {row} of {dataset} input has {actual} cells, expected {expected}")]
    RaggedRow {
        dataset: Dataset,
        row: usize,
        expected: usize,
        actual: usize,
    },
}
