//! # orderflow
//!
//! ETL for order lines and products: typed casting, name cleaning,
//! keep-first dedup and a left join into one denormalized table, plus a
//! weighted similarity scorer over the loaded product table.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! orderflow run --orders data/orders.csv --products data/products.csv \
//!     --destination orders.orders_denormalized --warehouse-dir warehouse
//! orderflow serve --products data/products.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use orderflow::prelude::*;
//!
//! let orders = RawTable::from_strs(
//!     Dataset::Orders,
//!     &["order_source_id", "order_created_datetime", "customer_id", "status", "sum",
//!       "quantity", "name", "surname", "patronymic", "product_id"],
//!     &[&["1", "2019-04-28 18:20:05", "5375", "Paid", "1300,65", "2",
//!         "Olena", "", "", "345f56"]],
//! ).unwrap();
//! let products = RawTable::from_strs(
//!     Dataset::Products,
//!     &["product_id", "price", "goods_group", "manufacturer"],
//!     &[&["34556", "45", "GroupA", "BIC"], &["59690", "56.55", "GroupA", "BIC"]],
//! ).unwrap();
//!
//! let output = EtlPipeline::new().process(&orders, &products).unwrap();
//! assert_eq!(output.records[0].name.as_deref(), Some("olena"));
//! assert_eq!(output.records[0].price, Some(45.0));
//!
//! let scorer = output.scorer(SimilarityWeights::default()).unwrap();
//! let report = scorer.score(34556, &[59690]).unwrap();
//! assert_eq!(report.get(59690), Some(0.93873));
//! ```
//!
//! ## Crate Structure
//!
//! - [`orderflow-core`](https://docs.rs/orderflow-core) - Records, casting, cleaning, dedup, join
//! - [`orderflow-similarity`](https://docs.rs/orderflow-similarity) - Weighted product similarity
//! - [`orderflow-storage`](https://docs.rs/orderflow-storage) - CSV input and table sinks
//! - [`orderflow-api`](https://docs.rs/orderflow-api) - HTTP similarity service

pub mod config;
pub mod pipeline;

// Re-export core types
pub use orderflow_core::{
    Category, Dataset, Error, JoinedRecord, OrderRecord, ProductId, ProductRecord, ProductTable,
    RawTable, Result, TypeCaster,
};

// Re-export similarity
pub use orderflow_similarity::{
    ExplainedScore, ScoreError, SimilarityReport, SimilarityScorer, SimilarityStats,
    SimilarityWeights,
};

// Re-export storage
pub use orderflow_storage::{
    CsvSource, Destination, MemorySink, OutputFormat, TableSink, WarehouseSink, WriteMode,
    WriteSummary,
};

// Re-export API
pub use orderflow_api::RestApi;

pub use config::EtlConfig;
pub use pipeline::{EtlPipeline, PipelineOutput, PipelineStats, RunSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Category, Dataset, Error, JoinedRecord, OrderRecord, ProductId, ProductRecord,
        ProductTable, RawTable, Result, TypeCaster,
        ScoreError, SimilarityReport, SimilarityScorer, SimilarityWeights,
        CsvSource, Destination, MemorySink, OutputFormat, TableSink, WarehouseSink, WriteMode,
        EtlConfig, EtlPipeline, PipelineOutput,
    };
}
