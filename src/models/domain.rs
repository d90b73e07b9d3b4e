use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of features the fitted models were trained on
pub const FEATURE_COUNT: usize = 10;

/// A property listing as submitted for valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRequest {
    #[serde(rename = "propertyType")]
    pub property_type: String,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(rename = "houseSize", default)]
    pub house_size: Option<f64>,
    #[serde(rename = "landSize", default)]
    pub land_size: Option<f64>,
}

/// Fixed-order feature vector fed to the fitted models
///
/// Field order is the order the models were trained on. `FEATURE_NAMES`
/// is the canonical ordering; the persisted feature-name artifact must
/// match it exactly or the bank refuses to load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub property_type_code: f64,
    pub location_code: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub house_size: f64,
    pub land_size: f64,
    pub bath_bed_ratio: f64,
    pub total_area: f64,
    pub location_premium: f64,
    pub property_premium: f64,
}

impl FeatureVector {
    pub const FEATURE_NAMES: [&'static str; FEATURE_COUNT] = [
        "property_type",
        "location",
        "bedrooms",
        "bathrooms",
        "house_size",
        "land_size",
        "bath_bed_ratio",
        "total_area",
        "location_premium",
        "property_premium",
    ];

    /// Flatten into the row layout the estimators consume
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.property_type_code,
            self.location_code,
            self.bedrooms,
            self.bathrooms,
            self.house_size,
            self.land_size,
            self.bath_bed_ratio,
            self.total_area,
            self.location_premium,
            self.property_premium,
        ]
    }
}

/// Relative weight of one feature in the forest's split decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub weight: f64,
}

/// Outcome of a single valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "predictedPrice")]
    pub predicted_price: f64,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
    #[serde(rename = "priceRangeMin")]
    pub price_range_min: f64,
    #[serde(rename = "priceRangeMax")]
    pub price_range_max: f64,
    #[serde(rename = "featureImportance")]
    pub feature_importance: Vec<FeatureImportance>,
    pub explanations: Vec<String>,
}

/// Aggregate statistics captured at training time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Average price deviation attributable to each location
    #[serde(default)]
    pub location_premium: HashMap<String, f64>,
    /// Average price deviation attributable to each property type
    #[serde(default)]
    pub property_premium: HashMap<String, f64>,
    /// Median house size in the training data, used to fill missing input
    pub median_house_size: f64,
    /// Median land size in the training data, used to fill missing input
    pub median_land_size: f64,
    pub metrics: ModelMetrics,
}

/// Snapshot of the fitted models' evaluation metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub model_version: String,
    pub mae: f64,
    pub rmse: f64,
    pub r2_score: f64,
    pub mape: f64,
    pub trained_at: DateTime<Utc>,
}

/// Blend weights for the three member models
///
/// These are design constants, not learned parameters. They may be
/// overridden through configuration but default exactly to the values
/// the models were evaluated with.
#[derive(Debug, Clone, Copy)]
pub struct EnsembleWeights {
    pub forest: f64,
    pub boosted: f64,
    pub linear: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            forest: 0.5,
            boosted: 0.3,
            linear: 0.2,
        }
    }
}
