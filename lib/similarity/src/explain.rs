//! Explainability for similarity scores
//!
//! Shows how much each product attribute contributed to a score.

use crate::distance::round5;
use crate::weights::Attribute;
use orderflow_core::ProductId;
use serde::Serialize;

/// Weighted contribution of each attribute to a score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Contributions {
    pub goods_group: f64,
    pub manufacturer: f64,
    pub price: f64,
}

impl Contributions {
    /// Unrounded sum of the contributions
    pub fn total(&self) -> f64 {
        self.goods_group + self.manufacturer + self.price
    }

    /// Final score, rounded to 5 decimals
    pub fn score(&self) -> f64 {
        round5(self.total())
    }

    /// Attribute with the largest contribution; ties go to the first in scoring order
    pub fn top_attribute(&self) -> Option<Attribute> {
        let entries = [
            (Attribute::GoodsGroup, self.goods_group),
            (Attribute::Manufacturer, self.manufacturer),
            (Attribute::Price, self.price),
        ];
        let mut best: Option<(Attribute, f64)> = None;
        for (attribute, value) in entries {
            if value <= 0.0 {
                continue;
            }
            match best {
                Some((_, current)) if current >= value => {}
                _ => best = Some((attribute, value)),
            }
        }
        best.map(|(attribute, _)| attribute)
    }

    fn rounded(&self) -> Self {
        Self {
            goods_group: round5(self.goods_group),
            manufacturer: round5(self.manufacturer),
            price: round5(self.price),
        }
    }
}

/// A candidate score with its per-attribute breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedScore {
    pub product_id: ProductId,
    /// Overall weighted similarity score
    pub score: f64,
    /// Per-attribute contributions (already weighted, rounded)
    pub explain: Contributions,
}

impl ExplainedScore {
    pub fn new(product_id: ProductId, contributions: Contributions) -> Self {
        Self {
            product_id,
            score: contributions.score(),
            explain: contributions.rounded(),
        }
    }
}

/// Summary statistics for a similarity query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of candidates requested
    pub candidates_count: usize,
    /// Number of candidates scored
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
    /// Attribute that contributed most to the best result
    pub top_contributing_attribute: Option<Attribute>,
}

impl SimilarityStats {
    /// Compute stats from explained results sorted by score descending
    pub fn compute(results: &[ExplainedScore], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_attribute: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score: round5(avg_score),
            best_score: best.score,
            top_contributing_attribute: best.explain.top_attribute(),
        }
    }
}
