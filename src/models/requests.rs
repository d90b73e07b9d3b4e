use crate::models::domain::PropertyRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for a single price prediction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "property_type", rename = "propertyType")]
    pub property_type: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 1, max = 20))]
    pub bedrooms: u32,
    #[validate(range(min = 1, max = 20))]
    pub bathrooms: u32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    #[serde(alias = "house_size", rename = "houseSize")]
    pub house_size: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    #[serde(alias = "land_size", rename = "landSize")]
    pub land_size: Option<f64>,
}

impl PredictRequest {
    /// Convert the validated wire request into the engine's value object
    pub fn into_domain(self) -> PropertyRequest {
        PropertyRequest {
            property_type: self.property_type,
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            house_size: self.house_size,
            land_size: self.land_size,
        }
    }
}

/// Request to predict several listings in one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictRequest {
    pub predictions: Vec<PredictRequest>,
}
