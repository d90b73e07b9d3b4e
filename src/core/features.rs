use crate::core::PredictionError;
use crate::models::{PropertyRequest, SummaryStats};

/// Secondary features derived from a raw request and training statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeredFeatures {
    pub house_size: f64,
    pub land_size: f64,
    pub bath_bed_ratio: f64,
    pub total_area: f64,
    pub location_premium: f64,
    pub property_premium: f64,
}

/// Derive secondary features from the raw request
///
/// Missing sizes are filled with the training medians, each field
/// independently. `total_area` intentionally treats a missing size as 0
/// rather than the median: the trained models saw the raw sums, not the
/// imputed ones. Categories with no premium entry in the stats score 0.
pub fn engineer_features(
    request: &PropertyRequest,
    stats: &SummaryStats,
) -> Result<EngineeredFeatures, PredictionError> {
    // Upstream validation requires bedrooms >= 1; a zero here would put
    // a NaN or infinity into the feature vector, so refuse it outright.
    if request.bedrooms == 0 {
        return Err(PredictionError::Domain(
            "bedrooms must be at least 1".to_string(),
        ));
    }

    let bath_bed_ratio = request.bathrooms as f64 / request.bedrooms as f64;
    let total_area = request.house_size.unwrap_or(0.0) + request.land_size.unwrap_or(0.0);

    let house_size = request.house_size.unwrap_or(stats.median_house_size);
    let land_size = request.land_size.unwrap_or(stats.median_land_size);

    let location_premium = stats
        .location_premium
        .get(&request.location)
        .copied()
        .unwrap_or(0.0);
    let property_premium = stats
        .property_premium
        .get(&request.property_type)
        .copied()
        .unwrap_or(0.0);

    Ok(EngineeredFeatures {
        house_size,
        land_size,
        bath_bed_ratio,
        total_area,
        location_premium,
        property_premium,
    })
}
