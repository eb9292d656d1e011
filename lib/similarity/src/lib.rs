//! # orderflow Similarity
//!
//! Weighted similarity between products of a retained product table.
//!
//! ## Scoring
//!
//! Each candidate is compared with the target on three attributes:
//!
//! - **goods_group** (weight 0.5): full credit on an exact label match
//! - **manufacturer** (weight 0.2): full credit on an exact label match
//! - **price** (weight 0.3): `1 - |target - candidate| / max(target, candidate)`
//!
//! The total is rounded to 5 decimal places. A product compared with itself
//! scores exactly 1.0.
//!
//! ## Example
//!
//! ```rust
//! use orderflow_core::{ProductRecord, ProductTable};
//! use orderflow_similarity::SimilarityScorer;
//! use std::sync::Arc;
//!
//! let table = Arc::new(ProductTable::new(vec![
//!     ProductRecord::new(34556, 45.0, "GroupA", "BIC"),
//!     ProductRecord::new(59690, 56.55, "GroupA", "BIC"),
//! ]));
//!
//! let scorer = SimilarityScorer::new(table);
//! let report = scorer.score(34556, &[59690, 34556]).unwrap();
//! assert_eq!(report.get(34556), Some(1.0));
//! assert_eq!(report.get(59690), Some(0.93873));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Weights   │────>│   Scorer    │<────│  Product    │
//! │ (attribute) │     │ (target vs  │     │  Table      │
//! └─────────────┘     │ candidates) │     │ (read-only) │
//!                     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │  Explain    │
//!                     │  (results)  │
//!                     └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod scorer;
pub mod weights;

// Re-export main types for convenience
pub use distance::{category_similarity, price_similarity, round5};
pub use explain::{Contributions, ExplainedScore, SimilarityStats};
pub use scorer::{ScoreError, SimilarityReport, SimilarityScorer};
pub use weights::{Attribute, SimilarityWeights, WeightsError};
