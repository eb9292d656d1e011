//! Weighted product similarity
//!
//! Scores candidate products against a target product using attributes looked
//! up in a shared [`ProductTable`].

use crate::distance::{category_similarity, price_similarity};
use crate::explain::{Contributions, ExplainedScore};
use crate::weights::{SimilarityWeights, WeightsError};
use orderflow_core::{ProductId, ProductRecord, ProductTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Errors returned by a similarity query
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Scores for one target against a set of candidates
///
/// Keys are ordered, so the report is identical whatever the order (or
/// repetition) of the requested candidate ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub target_id: ProductId,
    /// Score per candidate found in the product table, rounded to 5 decimals
    pub scores: BTreeMap<ProductId, f64>,
    /// Requested candidates that are not in the product table
    pub missing: BTreeSet<ProductId>,
}

impl SimilarityReport {
    pub fn get(&self, candidate_id: ProductId) -> Option<f64> {
        self.scores.get(&candidate_id).copied()
    }
}

/// Scorer over a read-only product table
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    products: Arc<ProductTable>,
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    /// Create a scorer with the default weights
    pub fn new(products: Arc<ProductTable>) -> Self {
        Self {
            products,
            weights: SimilarityWeights::default(),
        }
    }

    /// Create a scorer with custom weights, normalized to sum to 1.0
    pub fn with_weights(
        products: Arc<ProductTable>,
        mut weights: SimilarityWeights,
    ) -> Result<Self, WeightsError> {
        weights.validate_and_normalize()?;
        Ok(Self { products, weights })
    }

    pub fn products(&self) -> &Arc<ProductTable> {
        &self.products
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Score every candidate against the target
    ///
    /// A missing target fails the whole call. Missing candidates are listed
    /// in [`SimilarityReport::missing`] and do not affect the others.
    pub fn score(
        &self,
        target_id: ProductId,
        candidate_ids: &[ProductId],
    ) -> Result<SimilarityReport, ScoreError> {
        let target = self.lookup_target(target_id)?;

        let mut scores = BTreeMap::new();
        let mut missing = BTreeSet::new();
        for &candidate_id in candidate_ids {
            match self.products.get(candidate_id) {
                Some(candidate) => {
                    let score = self.compute_contributions(target, candidate).score();
                    scores.insert(candidate_id, score);
                }
                None => {
                    missing.insert(candidate_id);
                }
            }
        }

        if !missing.is_empty() {
            debug!(target_id, missing = ?missing, "candidates not in product table");
        }

        Ok(SimilarityReport {
            target_id,
            scores,
            missing,
        })
    }

    /// Score candidates with per-attribute contributions
    ///
    /// Results are sorted by score descending, then by product id. Missing
    /// candidates are skipped; duplicates appear once.
    pub fn explain(
        &self,
        target_id: ProductId,
        candidate_ids: &[ProductId],
    ) -> Result<Vec<ExplainedScore>, ScoreError> {
        let target = self.lookup_target(target_id)?;

        let unique: BTreeSet<ProductId> = candidate_ids.iter().copied().collect();
        let mut results: Vec<ExplainedScore> = unique
            .into_iter()
            .filter_map(|id| self.products.get(id))
            .map(|candidate| {
                let contributions = self.compute_contributions(target, candidate);
                ExplainedScore::new(candidate.product_id, contributions)
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.product_id.cmp(&b.product_id))
        });

        Ok(results)
    }

    /// Compute weighted per-attribute contributions of `candidate` against `target`
    pub fn compute_contributions(
        &self,
        target: &ProductRecord,
        candidate: &ProductRecord,
    ) -> Contributions {
        Contributions {
            goods_group: self.weights.goods_group
                * category_similarity(target.goods_group.as_ref(), candidate.goods_group.as_ref()),
            manufacturer: self.weights.manufacturer
                * category_similarity(
                    target.manufacturer.as_ref(),
                    candidate.manufacturer.as_ref(),
                ),
            price: self.weights.price * price_similarity(target.price, candidate.price),
        }
    }

    fn lookup_target(&self, target_id: ProductId) -> Result<&ProductRecord, ScoreError> {
        self.products
            .get(target_id)
            .ok_or(ScoreError::ProductNotFound(target_id))
    }
}
