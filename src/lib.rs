//! Bei Engine - property price prediction engine for Nairobi real-estate listings
//!
//! This library provides the core valuation engine: feature engineering,
//! categorical encoding, a three-model weighted ensemble, agreement-based
//! confidence with a per-tree 95% interval, and template-based explanations.
//! Serving, persistence and retraining live outside this crate and call in
//! through [`PricePredictor`].

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{PredictionError, PricePredictor};
pub use crate::models::{
    EnsembleWeights, PredictRequest, PredictResponse, PredictionResult, PropertyRequest,
};
pub use crate::services::{ArtifactError, ArtifactStore, ModelBank};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weights = EnsembleWeights::default();
        assert_eq!(weights.forest + weights.boosted + weights.linear, 1.0);
    }
}
