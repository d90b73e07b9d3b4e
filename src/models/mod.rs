// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    EnsembleWeights, FeatureImportance, FeatureVector, ModelMetrics, PredictionResult,
    PropertyRequest, SummaryStats, FEATURE_COUNT,
};
pub use requests::{BatchPredictRequest, PredictRequest};
pub use responses::{
    format_ksh, BatchPredictItem, BatchPredictResponse, ErrorResponse, ModelInfoResponse,
    PredictResponse, PriceRange,
};
