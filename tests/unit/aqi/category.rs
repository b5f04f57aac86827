//! Unit tests for the category classifier

use airwatch::aqi::{classify, classify_optional, label, AqiError, CategoryBoundaries};
use airwatch::models::AqiCategory;

#[test]
fn test_standard_buckets() {
    let cases = [
        (0.0, AqiCategory::Good),
        (50.0, AqiCategory::Good),
        (50.5, AqiCategory::Satisfactory),
        (51.0, AqiCategory::Satisfactory),
        (100.0, AqiCategory::Satisfactory),
        (100.5, AqiCategory::Moderate),
        (101.0, AqiCategory::Moderate),
        (166.67, AqiCategory::Moderate),
        (200.0, AqiCategory::Moderate),
        (200.4, AqiCategory::Poor),
        (201.0, AqiCategory::Poor),
        (300.0, AqiCategory::Poor),
        (300.0001, AqiCategory::VeryPoor),
        (400.0, AqiCategory::VeryPoor),
        (400.5, AqiCategory::Severe),
        (401.0, AqiCategory::Severe),
        (1200.0, AqiCategory::Severe),
        (f64::INFINITY, AqiCategory::Severe),
    ];
    for (index, expected) in cases {
        assert_eq!(classify(index).unwrap().category, expected, "index {}", index);
    }
}

#[test]
fn test_no_gaps_between_buckets() {
    let boundaries = CategoryBoundaries::standard();
    for bound in boundaries.upper_bounds() {
        let at = classify(*bound).unwrap().category.step().unwrap();
        for eps in [1e-9, 1e-3, 0.5] {
            let before = classify(bound - eps).unwrap().category.step().unwrap();
            let after = classify(bound + eps).unwrap().category.step().unwrap();
            assert_eq!(before, at, "boundary {} belongs to the lower bucket", bound);
            assert_eq!(after - at, 1, "just above {} is the next bucket", bound);
        }
    }
}

#[test]
fn test_fractional_sub_index_is_not_rounded_down() {
    // 30.3 µg/m³ PM2.5 interpolates to 50.5
    let result = airwatch::aqi::aggregate(
        &airwatch::models::Sample::new().with(airwatch::models::Pollutant::Pm25, 30.3),
    )
    .unwrap();
    assert!((result.overall_index - 50.5).abs() < 1e-9);
    assert_eq!(result.category.category, AqiCategory::Satisfactory);
}

#[test]
fn test_negative_index_is_invalid() {
    assert!(matches!(classify(-1.0), Err(AqiError::InvalidInput(_))));
    assert!(matches!(classify(f64::NEG_INFINITY), Err(AqiError::InvalidInput(_))));
}

#[test]
fn test_unavailable_index_gets_na_label() {
    assert_eq!(classify_optional(None).unwrap().category, AqiCategory::NotAvailable);
    assert_eq!(classify(f64::NAN).unwrap().category, AqiCategory::NotAvailable);
    assert_eq!(
        classify_optional(Some(75.0)).unwrap().category,
        AqiCategory::Satisfactory
    );
}

#[test]
fn test_every_label_carries_presentation_attributes() {
    for category in AqiCategory::SEVERITY
        .into_iter()
        .chain([AqiCategory::NotAvailable])
    {
        let label = label(category);
        assert_eq!(label.category, category);
        assert!(!label.description.is_empty());
        assert!(label.text_color.starts_with("text-"));
        assert!(label.border_color.starts_with("border-"));
        assert!(label.bg_color.starts_with("bg-"));
        assert!(label.chart_color.starts_with('#'));
    }
}

#[test]
fn test_label_serializes_for_frontend() {
    let value = serde_json::to_value(classify(350.0).unwrap()).unwrap();
    assert_eq!(value["category"], "Very Poor");
    assert_eq!(value["textColor"], "text-purple-400");
    assert_eq!(value["borderColor"], "border-purple-500");
    assert_eq!(value["bgColor"], "bg-purple-500/20");
    assert_eq!(value["chartColor"], "#a855f7");
}

#[test]
fn test_custom_boundaries_must_be_valid() {
    assert!(CategoryBoundaries::new([0.0, 100.0, 200.0, 300.0, 400.0]).is_err());
    assert!(CategoryBoundaries::new([50.0, 100.0, 100.0, 300.0, 400.0]).is_err());
    assert!(CategoryBoundaries::new([50.0, 100.0, 200.0, f64::NAN, 400.0]).is_err());

    let boundaries = CategoryBoundaries::new([10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
    assert_eq!(boundaries.classify(25.0).unwrap().category, AqiCategory::Moderate);
    assert_eq!(boundaries.classify(30.0).unwrap().category, AqiCategory::Moderate);
    assert_eq!(boundaries.upper_bound(AqiCategory::Poor), Some(40.0));
    assert_eq!(boundaries.upper_bound(AqiCategory::Severe), None);
    assert_eq!(boundaries.upper_bound(AqiCategory::NotAvailable), None);
}
