use crate::core::estimators::MemberPredictions;

/// Multiplier for a 95% interval under a normality assumption
const INTERVAL_Z: f64 = 1.96;

/// Agreement-based confidence score in [0, 1]
///
/// Computed over the three candidate prices: the forest prediction, the
/// boosted prediction and the already-blended ensemble price. Because
/// the blended price is dominated by the first two, disagreement is
/// likely understated; the formula is kept as-is for compatibility with
/// the scores the models were evaluated against.
pub fn agreement_confidence(forest_pred: f64, boosted_pred: f64, ensemble_price: f64) -> f64 {
    let predictions = [forest_pred, boosted_pred, ensemble_price];
    let mean = predictions.iter().sum::<f64>() / predictions.len() as f64;
    let std_dev = population_std(&predictions, mean);

    // A non-positive mean makes the coefficient of variation meaningless;
    // treat it as full disagreement.
    let cv = if mean > 0.0 { std_dev / mean } else { 1.0 };
    (1.0 - cv).clamp(0.0, 1.0)
}

/// 95% prediction interval from the spread of per-tree votes
///
/// Returns `(min, max)` with the lower bound floored at zero; negative
/// prices are meaningless in this domain.
pub fn prediction_interval(
    ensemble: &impl MemberPredictions,
    row: &[f64],
    price: f64,
) -> (f64, f64) {
    let votes = ensemble.member_predictions(row);
    let mean = votes.iter().sum::<f64>() / votes.len() as f64;
    let std_error = population_std(&votes, mean);

    let margin = INTERVAL_Z * std_error;
    ((price - margin).max(0.0), price + margin)
}

/// Population standard deviation (divisor n, not n-1)
fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
