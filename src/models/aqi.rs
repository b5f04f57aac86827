use crate::models::pollutant::Pollutant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model feature weights keyed by pollutant (non-negative, need not sum to 1)
pub type FeatureImportances = BTreeMap<Pollutant, f64>;

/// One segment of a pollutant's piecewise-linear concentration-to-index map.
///
/// Segments are half-open: `[concentration_low, concentration_high)`. The
/// last segment of a pollutant is open-ended; its `concentration_high` only
/// fixes the slope used above the final boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakpointRange {
    pub pollutant: Pollutant,
    pub concentration_low: f64,
    pub concentration_high: f64,
    pub index_low: f64,
    pub index_high: f64,
    #[serde(default)]
    pub open_ended: bool,
}

impl BreakpointRange {
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.concentration_low
            && (self.open_ended || concentration < self.concentration_high)
    }

    /// Index points per concentration unit
    pub fn slope(&self) -> f64 {
        (self.index_high - self.index_low) / (self.concentration_high - self.concentration_low)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubIndexResult {
    pub pollutant: Pollutant,
    pub value: f64,
    pub range: BreakpointRange,
}

/// Severity buckets, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl AqiCategory {
    /// Buckets that partition the index scale, in ascending order
    pub const SEVERITY: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Satisfactory,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
        AqiCategory::Severe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
            AqiCategory::NotAvailable => "N/A",
        }
    }

    /// Position on the severity scale; `None` for the not-available bucket
    pub fn step(&self) -> Option<usize> {
        Self::SEVERITY.iter().position(|c| c == self)
    }
}

/// Category plus everything the rendering layer needs to draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLabel {
    pub category: AqiCategory,
    pub description: &'static str,
    pub text_color: &'static str,
    pub border_color: &'static str,
    pub bg_color: &'static str,
    pub chart_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub overall_index: f64,
    pub dominant_pollutant: Pollutant,
    pub category: CategoryLabel,
    /// Computed sub-indices in priority order
    pub sub_indices: Vec<SubIndexResult>,
}

impl AggregateResult {
    pub fn sub_index(&self, pollutant: Pollutant) -> Option<f64> {
        self.sub_indices
            .iter()
            .find(|s| s.pollutant == pollutant)
            .map(|s| s.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub pollutant: Pollutant,
    pub sub_index: f64,
    /// Importance weight normalized over the model's features
    pub weight: f64,
    pub contribution: f64,
    pub share_percent: f64,
}

/// Contributions sorted by descending contribution, all strictly positive
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContributionBreakdown {
    entries: Vec<Contribution>,
}

impl ContributionBreakdown {
    pub(crate) fn from_sorted(entries: Vec<Contribution>) -> Self {
        Self { entries }
    }

    /// Primary explanatory factor
    pub fn primary(&self) -> Option<&Contribution> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contribution> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Contribution] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_aqi: f64,
    pub category: CategoryLabel,
    pub contributions: ContributionBreakdown,
    pub primary_factor: Option<Pollutant>,
}
