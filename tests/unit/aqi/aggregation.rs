//! Unit tests for sub-index aggregation

use crate::fixtures::assert_close;
use airwatch::aqi::{aggregate, compute_sub_index, AqiError, Aggregator, BreakpointTable, CategoryBoundaries};
use airwatch::models::{AqiCategory, Pollutant, Sample};

#[test]
fn test_pm25_dominated_sample_is_moderate() {
    let sample = Sample::new()
        .with(Pollutant::Pm25, 80.0)
        .with(Pollutant::Pm10, 40.0);

    let result = aggregate(&sample).unwrap();

    assert_close(result.overall_index, 100.0 + 100.0 / 30.0 * 20.0);
    assert_eq!(result.dominant_pollutant, Pollutant::Pm25);
    assert_eq!(result.category.category, AqiCategory::Moderate);
    assert_eq!(result.sub_indices.len(), 2);
    assert_close(result.sub_index(Pollutant::Pm10).unwrap(), 40.0);
}

#[test]
fn test_overall_is_max_not_average() {
    let sample = Sample::new()
        .with(Pollutant::Pm10, 10.0)
        .with(Pollutant::Co, 0.1)
        .with(Pollutant::So2, 600.0);

    let result = aggregate(&sample).unwrap();
    let max = result
        .sub_indices
        .iter()
        .map(|s| s.value)
        .fold(f64::MIN, f64::max);

    assert_eq!(result.overall_index, max);
    assert_eq!(result.dominant_pollutant, Pollutant::So2);
    assert_eq!(result.category.category, AqiCategory::Poor);
}

#[test]
fn test_single_pollutant_matches_sub_index() {
    for (pollutant, concentration) in [
        (Pollutant::Pm25, 45.0),
        (Pollutant::No2, 300.0),
        (Pollutant::O3, 900.0),
        (Pollutant::Nh3, 0.0),
    ] {
        let result = aggregate(&Sample::new().with(pollutant, concentration)).unwrap();
        assert_eq!(
            result.overall_index,
            compute_sub_index(pollutant, concentration).unwrap()
        );
        assert_eq!(result.dominant_pollutant, pollutant);
    }
}

#[test]
fn test_ties_go_to_higher_priority_pollutant() {
    // PM2.5 at 30 and PM10 at 50 both map to 50.
    let sample = Sample::new()
        .with(Pollutant::Pm10, 50.0)
        .with(Pollutant::Pm25, 30.0);
    assert_eq!(aggregate(&sample).unwrap().dominant_pollutant, Pollutant::Pm25);

    // NO2 at 40 and SO2 at 40 both map to 50.
    let sample = Sample::new()
        .with(Pollutant::So2, 40.0)
        .with(Pollutant::No2, 40.0);
    assert_eq!(aggregate(&sample).unwrap().dominant_pollutant, Pollutant::No2);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let entries = [
        (Pollutant::O3, 120.0),
        (Pollutant::Pm10, 260.0),
        (Pollutant::Co, 12.0),
        (Pollutant::Pm25, 95.0),
    ];
    let forward: Sample = entries.iter().copied().collect();
    let backward: Sample = entries.iter().rev().copied().collect();

    assert_eq!(aggregate(&forward).unwrap(), aggregate(&backward).unwrap());
}

#[test]
fn test_empty_sample_fails() {
    assert_eq!(aggregate(&Sample::new()), Err(AqiError::EmptySample));
}

#[test]
fn test_feature_only_pollutants_are_skipped() {
    let only_organics = Sample::new()
        .with(Pollutant::Benzene, 3.0)
        .with(Pollutant::No, 12.0);
    assert_eq!(aggregate(&only_organics), Err(AqiError::EmptySample));

    let mixed = only_organics.with(Pollutant::Pm10, 120.0);
    let result = aggregate(&mixed).unwrap();
    assert_eq!(result.sub_indices.len(), 1);
    assert_eq!(result.dominant_pollutant, Pollutant::Pm10);
}

#[test]
fn test_negative_concentration_fails() {
    let sample = Sample::new()
        .with(Pollutant::Pm25, -5.0)
        .with(Pollutant::Pm10, 40.0);
    assert!(matches!(aggregate(&sample), Err(AqiError::InvalidInput(_))));
}

#[test]
fn test_sub_indices_in_priority_order() {
    let sample = Sample::new()
        .with(Pollutant::O3, 10.0)
        .with(Pollutant::Pm25, 10.0)
        .with(Pollutant::Co, 1.0);
    let order: Vec<Pollutant> = aggregate(&sample)
        .unwrap()
        .sub_indices
        .iter()
        .map(|s| s.pollutant)
        .collect();
    assert_eq!(order, vec![Pollutant::Pm25, Pollutant::Co, Pollutant::O3]);
}

#[test]
fn test_custom_boundaries() {
    let boundaries = CategoryBoundaries::new([50.0, 100.0, 150.0, 200.0, 300.0]).unwrap();
    let aggregator = Aggregator::new(BreakpointTable::standard(), &boundaries);
    let result = aggregator
        .aggregate(&Sample::new().with(Pollutant::Pm25, 80.0))
        .unwrap();
    assert_eq!(result.category.category, AqiCategory::Poor);
}
