//! Predicted-AQI path: model inference, shared classification and the
//! contribution breakdown computed from the same sample.

use crate::aqi::category::classify;
use crate::aqi::explain::explain;
use crate::aqi::AqiError;
use crate::models::aqi::PredictionResult;
use crate::models::sample::Sample;
use crate::prediction::model::AqiModel;
use tracing::debug;

pub fn predict_aqi(model: &dyn AqiModel, sample: &Sample) -> Result<PredictionResult, AqiError> {
    if sample.is_empty() {
        return Err(AqiError::EmptySample);
    }

    let predicted_aqi = model.predict(sample)?;
    if !predicted_aqi.is_finite() {
        return Err(AqiError::model_unavailable(format!(
            "model returned a non-finite index ({})",
            predicted_aqi
        )));
    }
    let category = classify(predicted_aqi)?;
    let contributions = explain(sample, &model.feature_importances())?;
    let primary_factor = contributions.primary().map(|c| c.pollutant);

    debug!(
        predicted_aqi,
        category = category.category.name(),
        primary_factor = ?primary_factor,
        contributions = contributions.len(),
        "Prediction explained"
    );

    Ok(PredictionResult {
        predicted_aqi,
        category,
        contributions,
        primary_factor,
    })
}
