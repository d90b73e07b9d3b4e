// Core engine exports
pub mod confidence;
pub mod encoding;
pub mod estimators;
pub mod explain;
pub mod features;
pub mod predictor;

pub use confidence::{agreement_confidence, prediction_interval};
pub use encoding::CategoryVocabulary;
pub use estimators::{
    DecisionTree, GradientBoosted, MemberPredictions, RandomForest, RidgeModel, StandardScaler,
    TreeNode,
};
pub use explain::explain_prediction;
pub use features::{engineer_features, EngineeredFeatures};
pub use predictor::PricePredictor;

use thiserror::Error;

/// Errors a prediction call can surface to the caller
///
/// `UnknownCategory` and `Domain` are client-input failures and map to a
/// validation error at the boundary; `Internal` is a server fault and is
/// logged with full context before being returned. The engine never
/// substitutes defaults for a validation failure.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("unknown {field}: '{value}' is not in the trained vocabulary")]
    UnknownCategory { field: String, value: String },

    #[error("invalid input: {0}")]
    Domain(String),

    #[error("prediction failed: {0}")]
    Internal(String),
}

impl PredictionError {
    /// True for errors caused by the request rather than the engine
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
