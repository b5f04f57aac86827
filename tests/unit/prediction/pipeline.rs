//! Unit tests for the prediction pipeline

use crate::fixtures::StubModel;
use airwatch::aqi::{classify, AqiError};
use airwatch::models::{AqiCategory, Pollutant, Sample};
use airwatch::prediction::predict_aqi;

fn sample() -> Sample {
    Sample::new()
        .with(Pollutant::Pm25, 80.0)
        .with(Pollutant::Pm10, 40.0)
        .with(Pollutant::No2, 30.0)
}

#[test]
fn test_prediction_is_classified_and_explained() {
    let model = StubModel::returning(172.5);
    let result = predict_aqi(&model, &sample()).unwrap();

    assert_eq!(result.predicted_aqi, 172.5);
    assert_eq!(result.category, classify(172.5).unwrap());
    assert_eq!(result.category.category, AqiCategory::Moderate);
    assert_eq!(result.contributions.len(), 3);
    assert_eq!(result.primary_factor, Some(Pollutant::Pm25));
}

#[test]
fn test_category_independent_of_breakdown() {
    // The model may disagree with the rule-based index; its own value drives the label.
    let model = StubModel::returning(35.0);
    let result = predict_aqi(&model, &sample()).unwrap();
    assert_eq!(result.category.category, AqiCategory::Good);
    assert_eq!(result.primary_factor, Some(Pollutant::Pm25));
}

#[test]
fn test_primary_factor_follows_weights() {
    let model = StubModel::returning(90.0)
        .with_importances(&[(Pollutant::Pm25, 0.01), (Pollutant::No2, 0.99)]);
    let result = predict_aqi(&model, &sample()).unwrap();
    assert_eq!(result.primary_factor, Some(Pollutant::No2));
    assert_eq!(result.contributions.len(), 2);
}

#[test]
fn test_empty_sample_fails() {
    let model = StubModel::returning(100.0);
    assert_eq!(
        predict_aqi(&model, &Sample::new()).unwrap_err(),
        AqiError::EmptySample
    );
}

#[test]
fn test_model_failure_propagates() {
    let result = predict_aqi(&StubModel::failing(), &sample());
    assert!(matches!(result, Err(AqiError::ModelUnavailable(_))));
}

#[test]
fn test_bad_model_output_is_rejected() {
    assert!(matches!(
        predict_aqi(&StubModel::returning(-3.0), &sample()),
        Err(AqiError::InvalidInput(_))
    ));
    assert!(matches!(
        predict_aqi(&StubModel::returning(f64::NAN), &sample()),
        Err(AqiError::ModelUnavailable(_))
    ));
}
