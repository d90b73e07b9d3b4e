use crate::models::{FeatureImportance, PropertyRequest};

/// Number of features named in the "key factors" sentence
const TOP_FEATURES: usize = 3;

/// Generate the human-readable drivers of a prediction
///
/// Purely template-based: one sentence per attribute, plus a closing
/// sentence naming the strongest features by importance weight
/// (descending, ties broken by trained feature order).
pub fn explain_prediction(
    request: &PropertyRequest,
    feature_importance: &[FeatureImportance],
) -> Vec<String> {
    let mut explanations = Vec::new();

    explanations.push(format!(
        "Location ({}): premium area with high property values",
        request.location
    ));

    explanations.push(format!(
        "Property type ({}): influences base price significantly",
        request.property_type
    ));

    if let Some(house_size) = request.house_size {
        explanations.push(format!(
            "House size: {:.0} m\u{b2} contributes to overall value",
            house_size
        ));
    }

    explanations.push(format!(
        "Rooms: {} bedrooms and {} bathrooms affect pricing",
        request.bedrooms, request.bathrooms
    ));

    if !feature_importance.is_empty() {
        explanations.push(format!("Key factors: {}", top_features(feature_importance)));
    }

    explanations
}

/// Names of the top features by weight, comma separated
fn top_features(feature_importance: &[FeatureImportance]) -> String {
    let mut ranked: Vec<&FeatureImportance> = feature_importance.iter().collect();
    // Stable sort keeps the trained feature order for equal weights
    ranked.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
        .iter()
        .take(TOP_FEATURES)
        .map(|fi| fi.feature.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(house_size: Option<f64>) -> PropertyRequest {
        PropertyRequest {
            property_type: "Apartment".to_string(),
            location: "Kilimani".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            house_size,
            land_size: None,
        }
    }

    fn importance(weights: &[(&str, f64)]) -> Vec<FeatureImportance> {
        weights
            .iter()
            .map(|(feature, weight)| FeatureImportance {
                feature: feature.to_string(),
                weight: *weight,
            })
            .collect()
    }

    #[test]
    fn test_mentions_all_attributes() {
        let explanations = explain_prediction(
            &request(Some(150.0)),
            &importance(&[("location", 0.4), ("house_size", 0.3), ("bedrooms", 0.2)]),
        );

        assert_eq!(explanations.len(), 5);
        assert!(explanations[0].contains("Kilimani"));
        assert!(explanations[1].contains("Apartment"));
        assert!(explanations[2].contains("150"));
        assert!(explanations[3].contains("3 bedrooms"));
        assert!(explanations[4].starts_with("Key factors:"));
    }

    #[test]
    fn test_size_sentence_skipped_when_missing() {
        let explanations = explain_prediction(&request(None), &importance(&[("location", 1.0)]));
        assert!(explanations.iter().all(|e| !e.starts_with("House size")));
    }

    #[test]
    fn test_top_features_ranked_by_weight() {
        let explanations = explain_prediction(
            &request(None),
            &importance(&[
                ("property_type", 0.1),
                ("location", 0.5),
                ("bedrooms", 0.2),
                ("total_area", 0.3),
            ]),
        );
        let key = explanations.last().unwrap();
        assert_eq!(key, "Key factors: location, total_area, bedrooms");
    }

    #[test]
    fn test_ties_keep_feature_order() {
        let explanations = explain_prediction(
            &request(None),
            &importance(&[
                ("property_type", 0.25),
                ("location", 0.25),
                ("bedrooms", 0.25),
                ("bathrooms", 0.25),
            ]),
        );
        let key = explanations.last().unwrap();
        assert_eq!(key, "Key factors: property_type, location, bedrooms");
    }

    #[test]
    fn test_deterministic_output() {
        let imp = importance(&[("location", 0.5), ("bedrooms", 0.5)]);
        let a = explain_prediction(&request(Some(100.0)), &imp);
        let b = explain_prediction(&request(Some(100.0)), &imp);
        assert_eq!(a, b);
    }
}
