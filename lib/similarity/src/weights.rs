//! Similarity weights
//!
//! Declares how much each product attribute contributes to the overall
//! similarity score. Weights are validated and normalized to sum to 1.0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of each product attribute in the overall similarity score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityWeights {
    /// Credit for an identical goods group
    pub goods_group: f64,
    /// Credit for an identical manufacturer
    pub manufacturer: f64,
    /// Scale of the relative price similarity
    pub price: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            goods_group: 0.5,
            manufacturer: 0.2,
            price: 0.3,
        }
    }
}

impl SimilarityWeights {
    pub fn new(goods_group: f64, manufacturer: f64, price: f64) -> Self {
        Self {
            goods_group,
            manufacturer,
            price,
        }
    }

    pub fn total(&self) -> f64 {
        self.goods_group + self.manufacturer + self.price
    }

    /// Validate the weights
    /// - Checks that weights are finite and non-negative
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), WeightsError> {
        for (attribute, weight) in self.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightsError::InvalidWeight(attribute));
            }
        }

        let weight_sum = self.total();
        if weight_sum <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }

        if (weight_sum - 1.0).abs() > 0.001 {
            self.goods_group /= weight_sum;
            self.manufacturer /= weight_sum;
            self.price /= weight_sum;
        }

        Ok(())
    }

    /// Get weights paired with their attribute, in scoring order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> {
        [
            (Attribute::GoodsGroup, self.goods_group),
            (Attribute::Manufacturer, self.manufacturer),
            (Attribute::Price, self.price),
        ]
        .into_iter()
    }
}

/// Product attribute taking part in similarity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    GoodsGroup,
    Manufacturer,
    Price,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::GoodsGroup => "goods_group",
            Attribute::Manufacturer => "manufacturer",
            Attribute::Price => "price",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("Weight for '{0}' must be a finite, non-negative number")]
    InvalidWeight(Attribute),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}
