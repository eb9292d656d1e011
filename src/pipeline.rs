//! ETL orchestration
//!
//! Runs the stages in order: cast, dedup, clean names (orders only), join.
//! The product table built along the way is kept and shared with the
//! similarity scorer.

use crate::config::EtlConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use orderflow_core::{
    clean_order_names, dedup_orders, dedup_products, left_join, Dataset, JoinedRecord,
    ProductTable, RawTable, TypeCaster,
};
use orderflow_similarity::{SimilarityScorer, SimilarityWeights, WeightsError};
use orderflow_storage::{CsvSource, TableSink, WriteSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Row counts observed at each stage of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub orders_read: usize,
    pub duplicate_orders: usize,
    pub products_read: usize,
    pub duplicate_products: usize,
    /// Rows in the joined record set handed to the sink
    pub rows_output: usize,
    /// Output rows whose product is not in the product table
    pub unmatched_rows: usize,
}

/// Result of processing one pair of input tables
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub records: Vec<JoinedRecord>,
    pub products: Arc<ProductTable>,
    pub stats: PipelineStats,
}

impl PipelineOutput {
    /// Scorer over the product table of this run
    pub fn scorer(&self, weights: SimilarityWeights) -> Result<SimilarityScorer, WeightsError> {
        SimilarityScorer::with_weights(self.products.clone(), weights)
    }
}

/// What a full run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub stats: PipelineStats,
    pub write: WriteSummary,
}

#[derive(Debug, Clone, Default)]
pub struct EtlPipeline {
    source: CsvSource,
}

impl EtlPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: CsvSource) -> Self {
        Self { source }
    }

    /// Transform raw orders and products into the denormalized record set
    ///
    /// Any cell that fails its declared type aborts the whole run.
    pub fn process(
        &self,
        orders_raw: &RawTable,
        products_raw: &RawTable,
    ) -> orderflow_core::Result<PipelineOutput> {
        let run_id = Uuid::new_v4();

        let orders = TypeCaster::cast_orders(orders_raw)?;
        let products = TypeCaster::cast_products(products_raw)?;
        let orders_read = orders.len();
        let products_read = products.len();

        let mut orders = dedup_orders(orders);
        let products = dedup_products(products);
        let duplicate_orders = orders_read - orders.len();
        let duplicate_products = products_read - products.len();

        clean_order_names(&mut orders);

        let products = Arc::new(ProductTable::new(products));
        let records = left_join(orders, &products);
        let unmatched_rows = records.iter().filter(|r| !r.is_matched()).count();

        let stats = PipelineStats {
            orders_read,
            duplicate_orders,
            products_read,
            duplicate_products,
            rows_output: records.len(),
            unmatched_rows,
        };
        info!(
            run_id = %run_id,
            orders = orders_read,
            duplicate_orders,
            products = products_read,
            duplicate_products,
            rows = records.len(),
            unmatched_rows,
            "pipeline processed"
        );

        Ok(PipelineOutput {
            run_id,
            records,
            products,
            stats,
        })
    }

    /// Read the configured inputs, process them and hand the result to `sink`
    pub fn run(
        &self,
        config: &EtlConfig,
        sink: &dyn TableSink,
    ) -> Result<(PipelineOutput, RunSummary)> {
        config.validate()?;
        let destination = config.destination()?;
        let started_at = Utc::now();

        let orders_raw = self.source.read(&config.orders_csv, Dataset::Orders)?;
        let products_raw = self.source.read(&config.products_csv, Dataset::Products)?;

        let output = self
            .process(&orders_raw, &products_raw)
            .context("pipeline aborted on malformed input")?;

        let write = sink
            .write(&destination, &output.records, config.write_mode)
            .with_context(|| format!("failed to write {}", destination))?;
        info!(run_id = %output.run_id, destination = %destination, rows = write.rows, "run complete");

        let summary = RunSummary {
            run_id: output.run_id,
            started_at,
            stats: output.stats,
            write,
        };
        Ok((output, summary))
    }
}
