use crate::models::domain::{FeatureImportance, ModelMetrics, PredictionResult, PropertyRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "predictionId")]
    pub prediction_id: Uuid,
    #[serde(rename = "predictedPrice")]
    pub predicted_price: f64,
    #[serde(rename = "predictedPriceFormatted")]
    pub predicted_price_formatted: String,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
    #[serde(rename = "confidencePercentage")]
    pub confidence_percentage: String,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "featureImportance")]
    pub feature_importance: Vec<FeatureImportance>,
    pub explanations: Vec<String>,
    #[serde(rename = "modelMetrics")]
    pub model_metrics: ModelMetrics,
    #[serde(rename = "inputFeatures")]
    pub input_features: PropertyRequest,
}

/// Uncertainty band around a prediction, with display strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    #[serde(rename = "minFormatted")]
    pub min_formatted: String,
    #[serde(rename = "maxFormatted")]
    pub max_formatted: String,
}

impl PredictResponse {
    pub fn new(request: PropertyRequest, result: PredictionResult, metrics: ModelMetrics) -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            predicted_price: result.predicted_price,
            predicted_price_formatted: format_ksh(result.predicted_price),
            confidence_score: result.confidence_score,
            confidence_percentage: format!("{:.1}%", result.confidence_score * 100.0),
            price_range: PriceRange {
                min: result.price_range_min,
                max: result.price_range_max,
                min_formatted: format_ksh(result.price_range_min),
                max_formatted: format_ksh(result.price_range_max),
            },
            feature_importance: result.feature_importance,
            explanations: result.explanations,
            model_metrics: metrics,
            input_features: request,
        }
    }
}

/// Read-only information about the loaded models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    #[serde(rename = "modelVersion")]
    pub model_version: String,
    pub metrics: ModelMetrics,
    #[serde(rename = "featureImportance")]
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(rename = "supportedPropertyTypes")]
    pub supported_property_types: Vec<String>,
    #[serde(rename = "supportedLocations")]
    pub supported_locations: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// One entry of a batch prediction; failed items carry an error message
/// instead of aborting the whole batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictItem {
    pub input: PropertyRequest,
    #[serde(rename = "predictedPrice", skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    #[serde(rename = "confidenceScore", skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchPredictItem {
    pub fn ok(input: PropertyRequest, result: &PredictionResult) -> Self {
        Self {
            input,
            predicted_price: Some(result.predicted_price),
            confidence_score: Some(result.confidence_score),
            error: None,
        }
    }

    pub fn failed(input: PropertyRequest, message: impl Into<String>) -> Self {
        Self {
            input,
            predicted_price: None,
            confidence_score: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictResponse {
    pub results: Vec<BatchPredictItem>,
}

/// Format a price in Kenyan shillings with thousands separators,
/// e.g. `KSh 19,900,000`
pub fn format_ksh(value: f64) -> String {
    let negative = value < 0.0;
    let mut n = value.abs().round() as u64;
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    let digits = groups.join(",");
    if negative {
        format!("KSh -{}", digits)
    } else {
        format!("KSh {}", digits)
    }
}
