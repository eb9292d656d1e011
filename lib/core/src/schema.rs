//! Declared dataset schemas
//!
//! Both input datasets have a fixed column subset and a fixed semantic type
//! per column. Nothing is inferred from the data: a table that lacks a
//! declared column is rejected, and extra columns are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two input datasets the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Orders,
    Products,
}

impl Dataset {
    /// Get the declared schema for this dataset
    pub fn schema(self) -> &'static DatasetSchema {
        match self {
            Dataset::Orders => &ORDERS_SCHEMA,
            Dataset::Products => &PRODUCTS_SCHEMA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Orders => "orders",
            Dataset::Products => "products",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type a raw text cell is cast to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Signed 64-bit integer
    Integer,
    /// Finite 64-bit float
    Decimal,
    /// Naive date-time without timezone
    Timestamp,
    /// Repeated label from an open set, nullable
    Category,
    /// Free text, nullable
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Category => "category",
            FieldKind::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn column(name: &'static str, kind: FieldKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

/// Column subset and types of one dataset, in read order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSchema {
    pub dataset: Dataset,
    pub columns: &'static [ColumnSpec],
}

impl DatasetSchema {
    /// Get the declared column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Get a column spec by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

pub static ORDERS_SCHEMA: DatasetSchema = DatasetSchema {
    dataset: Dataset::Orders,
    columns: &[
        column("order_source_id", FieldKind::Integer),
        column("order_created_datetime", FieldKind::Timestamp),
        column("customer_id", FieldKind::Integer),
        column("status", FieldKind::Category),
        column("sum", FieldKind::Decimal),
        column("quantity", FieldKind::Integer),
        column("name", FieldKind::Text),
        column("surname", FieldKind::Text),
        column("patronymic", FieldKind::Text),
        column("product_id", FieldKind::Integer),
    ],
};

pub static PRODUCTS_SCHEMA: DatasetSchema = DatasetSchema {
    dataset: Dataset::Products,
    columns: &[
        column("product_id", FieldKind::Integer),
        column("price", FieldKind::Decimal),
        column("goods_group", FieldKind::Category),
        column("manufacturer", FieldKind::Category),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_schema_columns() {
        let names: Vec<_> = Dataset::Orders.schema().column_names().collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "order_source_id");
        assert_eq!(names[9], "product_id");
        assert_eq!(
            ORDERS_SCHEMA.get_column("sum").map(|c| c.kind),
            Some(FieldKind::Decimal)
        );
    }

    #[test]
    fn test_products_schema_columns() {
        let schema = Dataset::Products.schema();
        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema.get_column("manufacturer").map(|c| c.kind),
            Some(FieldKind::Category)
        );
        assert!(schema.get_column("status").is_none());
    }

    #[test]
    fn test_dataset_serde() {
        let json = serde_json::to_string(&Dataset::Products).unwrap();
        assert_eq!(json, "\"products\"");
        let parsed: Dataset = serde_json::from_str("\"orders\"").unwrap();
        assert_eq!(parsed, Dataset::Orders);
    }
}
