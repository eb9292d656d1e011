//! # orderflow Core
//!
//! Core library for the orderflow ETL.
//!
//! This crate provides the typed data model and the transformation stages:
//!
//! - [`RawTable`] - Untyped text table restricted to the declared columns
//! - [`TypeCaster`] - Casting of raw cells to typed [`OrderRecord`]s and [`ProductRecord`]s
//! - [`clean_name`] - Normalization of name / surname / patronymic values
//! - [`dedup_by_key`] - Keep-first deduplication
//! - [`left_join`] - Orders joined onto a [`ProductTable`]
//!
//! ## Example
//!
//! ```rust
//! use orderflow_core::{Dataset, RawTable, TypeCaster, ProductTable};
//!
//! let raw = RawTable::from_strs(
//!     Dataset::Products,
//!     &["product_id", "price", "goods_group", "manufacturer"],
//!     &[&["34556", "45", "Pens", "BIC"], &["34556", "50", "Pens", "BIC"]],
//! ).unwrap();
//!
//! let products = ProductTable::new(TypeCaster::cast_products(&raw).unwrap());
//! assert_eq!(products.len(), 1);
//! assert_eq!(products.get(34556).unwrap().price, 45.0);
//! ```

pub mod cast;
pub mod clean;
pub mod dedup;
pub mod error;
pub mod join;
pub mod products;
pub mod record;
pub mod schema;
pub mod table;

pub use cast::TypeCaster;
pub use clean::{clean_column, clean_name, clean_order_names};
pub use dedup::{dedup_by_key, dedup_orders, dedup_products};
pub use error::{Error, Result};
pub use join::left_join;
pub use products::ProductTable;
pub use record::{Category, CategoryInterner, JoinedRecord, OrderRecord, ProductId, ProductRecord};
pub use schema::{ColumnSpec, Dataset, DatasetSchema, FieldKind, ORDERS_SCHEMA, PRODUCTS_SCHEMA};
pub use table::RawTable;
