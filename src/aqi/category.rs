//! Index → severity category classification, shared by the rule-based and
//! model-based paths so both render with identical labels and colors.

use crate::aqi::error::AqiError;
use crate::models::aqi::{AqiCategory, CategoryLabel};
use std::sync::OnceLock;

static STANDARD: OnceLock<CategoryBoundaries> = OnceLock::new();

/// Inclusive upper bound of each bounded severity bucket, in
/// `AqiCategory::SEVERITY` order.
///
/// A bucket is `(previous_upper, upper]`, the first starting at 0. Anything
/// above the last bound is Severe, so fractional indices such as 50.5 fall
/// into the next bucket up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBoundaries {
    upper_bounds: [f64; 5],
}

impl Default for CategoryBoundaries {
    fn default() -> Self {
        Self {
            upper_bounds: [50.0, 100.0, 200.0, 300.0, 400.0],
        }
    }
}

impl CategoryBoundaries {
    pub fn new(upper_bounds: [f64; 5]) -> Result<Self, AqiError> {
        if upper_bounds.iter().any(|b| !b.is_finite()) {
            return Err(AqiError::invalid_input("category boundaries must be finite"));
        }
        if upper_bounds[0] <= 0.0 {
            return Err(AqiError::invalid_input(format!(
                "first category boundary must be positive, got {}",
                upper_bounds[0]
            )));
        }
        if upper_bounds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AqiError::invalid_input(format!(
                "category boundaries must be strictly ascending, got {:?}",
                upper_bounds
            )));
        }
        Ok(Self { upper_bounds })
    }

    pub fn standard() -> &'static CategoryBoundaries {
        STANDARD.get_or_init(CategoryBoundaries::default)
    }

    /// `None` for Severe (unbounded) and N/A
    pub fn upper_bound(&self, category: AqiCategory) -> Option<f64> {
        category
            .step()
            .and_then(|step| self.upper_bounds.get(step).copied())
    }

    pub fn upper_bounds(&self) -> &[f64; 5] {
        &self.upper_bounds
    }

    /// NaN means "no usable index" and maps to the not-available bucket.
    pub fn classify(&self, index: f64) -> Result<CategoryLabel, AqiError> {
        if index.is_nan() {
            return Ok(label(AqiCategory::NotAvailable));
        }
        if index < 0.0 {
            return Err(AqiError::invalid_input(format!(
                "index must be non-negative, got {}",
                index
            )));
        }
        let step = self.upper_bounds.partition_point(|bound| *bound < index);
        Ok(label(AqiCategory::SEVERITY[step]))
    }
}

/// Classify with the standard boundaries
pub fn classify(index: f64) -> Result<CategoryLabel, AqiError> {
    CategoryBoundaries::standard().classify(index)
}

/// Classify an index that may be unavailable
pub fn classify_optional(index: Option<f64>) -> Result<CategoryLabel, AqiError> {
    match index {
        Some(value) => classify(value),
        None => Ok(label(AqiCategory::NotAvailable)),
    }
}

/// Presentation attributes for a category
pub fn label(category: AqiCategory) -> CategoryLabel {
    let (description, text_color, border_color, bg_color, chart_color) = match category {
        AqiCategory::Good => (
            "Minimal impact.",
            "text-green-400",
            "border-green-500",
            "bg-green-500/20",
            "#34d399",
        ),
        AqiCategory::Satisfactory => (
            "Minor breathing discomfort.",
            "text-yellow-400",
            "border-yellow-500",
            "bg-yellow-500/20",
            "#f59e0b",
        ),
        AqiCategory::Moderate => (
            "Breathing discomfort to sensitive groups.",
            "text-orange-400",
            "border-orange-500",
            "bg-orange-500/20",
            "#f97316",
        ),
        AqiCategory::Poor => (
            "Breathing discomfort to most people.",
            "text-red-400",
            "border-red-500",
            "bg-red-500/20",
            "#ef4444",
        ),
        AqiCategory::VeryPoor => (
            "Respiratory illness on prolonged exposure.",
            "text-purple-400",
            "border-purple-500",
            "bg-purple-500/20",
            "#a855f7",
        ),
        AqiCategory::Severe => (
            "Serious health effects.",
            "text-rose-700",
            "border-rose-700",
            "bg-rose-800/20",
            "#be123c",
        ),
        AqiCategory::NotAvailable => (
            "AQI data invalid.",
            "text-slate-400",
            "border-slate-500",
            "bg-slate-500/10",
            "#64748b",
        ),
    };

    CategoryLabel {
        category,
        description,
        text_color,
        border_color,
        bg_color,
        chart_color,
    }
}
