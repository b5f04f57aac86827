//! Sub-index aggregation
//!
//! The overall index is the maximum sub-index, never an average: one badly
//! polluted constituent dominates the composite score.

use crate::aqi::breakpoints::BreakpointTable;
use crate::aqi::category::CategoryBoundaries;
use crate::aqi::error::AqiError;
use crate::aqi::subindex::sub_index_with;
use crate::models::aqi::{AggregateResult, SubIndexResult};
use crate::models::sample::Sample;
use tracing::debug;

/// Aggregate with the standard breakpoint table and category boundaries
pub fn aggregate(sample: &Sample) -> Result<AggregateResult, AqiError> {
    Aggregator::standard().aggregate(sample)
}

#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    table: &'a BreakpointTable,
    boundaries: &'a CategoryBoundaries,
}

impl Aggregator<'static> {
    pub fn standard() -> Self {
        Self::new(BreakpointTable::standard(), CategoryBoundaries::standard())
    }
}

impl<'a> Aggregator<'a> {
    pub fn new(table: &'a BreakpointTable, boundaries: &'a CategoryBoundaries) -> Self {
        Self { table, boundaries }
    }

    /// Sub-indices for every present pollutant that has breakpoints, in
    /// priority order. Pollutants without breakpoints (model-only features)
    /// are skipped.
    pub fn sub_indices(&self, sample: &Sample) -> Result<Vec<SubIndexResult>, AqiError> {
        sample
            .iter()
            .filter(|(pollutant, _)| self.table.has_breakpoints(*pollutant))
            .map(|(pollutant, concentration)| sub_index_with(self.table, pollutant, concentration))
            .collect()
    }

    pub fn aggregate(&self, sample: &Sample) -> Result<AggregateResult, AqiError> {
        let sub_indices = self.sub_indices(sample)?;

        // Strictly greater keeps the earlier, higher-priority pollutant on ties.
        let mut dominant: Option<&SubIndexResult> = None;
        for result in &sub_indices {
            if dominant.map_or(true, |d| result.value > d.value) {
                dominant = Some(result);
            }
        }
        let dominant = dominant.ok_or(AqiError::EmptySample)?;

        let overall_index = dominant.value;
        let dominant_pollutant = dominant.pollutant;
        let category = self.boundaries.classify(overall_index)?;

        debug!(
            overall_index,
            dominant = %dominant_pollutant,
            category = category.category.name(),
            pollutants = sub_indices.len(),
            "Aggregated sample"
        );

        Ok(AggregateResult {
            overall_index,
            dominant_pollutant,
            category,
            sub_indices,
        })
    }
}
