use crate::core::{
    confidence::{agreement_confidence, prediction_interval},
    explain::explain_prediction,
    features::engineer_features,
    PredictionError,
};
use crate::models::{
    EnsembleWeights, FeatureImportance, FeatureVector, ModelMetrics, PredictionResult,
    PropertyRequest,
};
use crate::services::ModelBank;
use std::sync::Arc;
use tracing::{debug, error};

/// Main prediction orchestrator
///
/// # Pipeline stages
/// 1. Categorical encoding + feature engineering
/// 2. Weighted three-model ensemble
/// 3. Confidence score and 95% interval
/// 4. Explanation generation
///
/// Stateless apart from the immutable, shared ModelBank; safe to share
/// across concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct PricePredictor {
    bank: Arc<ModelBank>,
    weights: EnsembleWeights,
}

impl PricePredictor {
    pub fn new(bank: Arc<ModelBank>, weights: EnsembleWeights) -> Self {
        Self { bank, weights }
    }

    pub fn with_default_weights(bank: Arc<ModelBank>) -> Self {
        Self::new(bank, EnsembleWeights::default())
    }

    /// Produce a full prediction for one listing
    pub fn predict(&self, request: &PropertyRequest) -> Result<PredictionResult, PredictionError> {
        let features = self.build_features(request)?;
        let row = features.to_array();

        let (price, forest_pred, boosted_pred) = self.ensemble_predict(&row)?;

        let confidence_score = agreement_confidence(forest_pred, boosted_pred, price);
        let (price_range_min, price_range_max) =
            prediction_interval(&self.bank.forest, &row, price);

        let feature_importance = self.feature_importance();
        let explanations = explain_prediction(request, &feature_importance);

        debug!(
            price,
            confidence_score, "prediction complete for {} in {}", request.property_type, request.location
        );

        Ok(PredictionResult {
            predicted_price: price,
            confidence_score,
            price_range_min,
            price_range_max,
            feature_importance,
            explanations,
        })
    }

    /// Predict several listings, isolating per-item failures
    ///
    /// One invalid listing never aborts the rest of the batch.
    pub fn predict_batch(
        &self,
        requests: &[PropertyRequest],
    ) -> Vec<Result<PredictionResult, PredictionError>> {
        requests.iter().map(|request| self.predict(request)).collect()
    }

    /// Regenerate the explanation sentences for an existing result
    ///
    /// Pure presentation logic; reads only the request attributes and
    /// the result's feature importance.
    pub fn explain(&self, request: &PropertyRequest, result: &PredictionResult) -> Vec<String> {
        explain_prediction(request, &result.feature_importance)
    }

    /// Encode categories and engineer the fixed-order feature vector
    pub fn build_features(
        &self,
        request: &PropertyRequest,
    ) -> Result<FeatureVector, PredictionError> {
        let property_type_code = self
            .bank
            .property_types
            .encode("property_type", &request.property_type)?;
        let location_code = self.bank.locations.encode("location", &request.location)?;

        let engineered = engineer_features(request, &self.bank.stats)?;

        Ok(FeatureVector {
            property_type_code: property_type_code as f64,
            location_code: location_code as f64,
            bedrooms: request.bedrooms as f64,
            bathrooms: request.bathrooms as f64,
            house_size: engineered.house_size,
            land_size: engineered.land_size,
            bath_bed_ratio: engineered.bath_bed_ratio,
            total_area: engineered.total_area,
            location_premium: engineered.location_premium,
            property_premium: engineered.property_premium,
        })
    }

    /// Weighted blend of the three member models
    ///
    /// The forest and boosted models consume the raw row; the ridge
    /// model requires the scaler's transform. This asymmetry matches
    /// how the models were fitted and must not be "fixed".
    fn ensemble_predict(&self, row: &[f64]) -> Result<(f64, f64, f64), PredictionError> {
        let scaled = self.bank.scaler.transform(row);

        let forest_pred = self.bank.forest.predict(row);
        let boosted_pred = self.bank.boosted.predict(row);
        let ridge_pred = self.bank.linear.predict(&scaled);

        let price = self.weights.forest * forest_pred
            + self.weights.boosted * boosted_pred
            + self.weights.linear * ridge_pred;

        if !price.is_finite() {
            error!(
                forest_pred,
                boosted_pred, ridge_pred, "ensemble produced a non-finite price"
            );
            return Err(PredictionError::Internal(
                "ensemble produced a non-finite price".to_string(),
            ));
        }

        Ok((price, forest_pred, boosted_pred))
    }

    /// Importance weights of the forest, paired with the feature names
    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        self.bank
            .feature_names
            .iter()
            .zip(self.bank.forest.feature_importances.iter())
            .map(|(feature, weight)| FeatureImportance {
                feature: feature.clone(),
                weight: *weight,
            })
            .collect()
    }

    /// Metrics snapshot captured when the models were trained
    pub fn metrics(&self) -> &ModelMetrics {
        &self.bank.stats.metrics
    }

    /// Property types the models were trained on
    pub fn property_types(&self) -> &[String] {
        self.bank.property_types.labels()
    }

    /// Locations the models were trained on
    pub fn locations(&self) -> &[String] {
        self.bank.locations.labels()
    }
}
