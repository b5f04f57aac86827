//! Contribution breakdown for model predictions
//!
//! Each pollutant's contribution is its own sub-index scaled by the model's
//! importance weight, normalized over every feature the model reports:
//!
//! contribution(p) = sub_index(p) * w(p) / sum(w)
//!
//! When all weights are zero, every reported feature gets `1 / n`. The
//! normalization does not change the ranking, it only keeps contributions on
//! the sub-index scale.

use crate::aqi::breakpoints::BreakpointTable;
use crate::aqi::error::AqiError;
use crate::aqi::subindex::sub_index_with;
use crate::models::aqi::{Contribution, ContributionBreakdown, FeatureImportances};
use crate::models::sample::Sample;

/// Breakdown using the standard breakpoint table
pub fn explain(
    sample: &Sample,
    importances: &FeatureImportances,
) -> Result<ContributionBreakdown, AqiError> {
    explain_with(BreakpointTable::standard(), sample, importances)
}

pub fn explain_with(
    table: &BreakpointTable,
    sample: &Sample,
    importances: &FeatureImportances,
) -> Result<ContributionBreakdown, AqiError> {
    if let Some((pollutant, weight)) = importances
        .iter()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(AqiError::invalid_input(format!(
            "importance weight for {} must be a non-negative number, got {}",
            pollutant, weight
        )));
    }

    let total_weight: f64 = importances.values().sum();
    let uniform = 1.0 / importances.len().max(1) as f64;

    let mut entries = Vec::new();
    for (pollutant, concentration) in sample.iter() {
        let Some(&weight) = importances.get(&pollutant) else {
            continue;
        };
        if !table.has_breakpoints(pollutant) {
            continue;
        }

        let sub_index = sub_index_with(table, pollutant, concentration)?.value;
        let weight = if total_weight > 0.0 {
            weight / total_weight
        } else {
            uniform
        };
        let contribution = sub_index * weight;
        if contribution > 0.0 {
            entries.push(Contribution {
                pollutant,
                sub_index,
                weight,
                contribution,
                share_percent: 0.0,
            });
        }
    }

    let total: f64 = entries.iter().map(|c| c.contribution).sum();
    for entry in &mut entries {
        entry.share_percent = entry.contribution / total * 100.0;
    }

    entries.sort_by(|a, b| {
        b.contribution
            .total_cmp(&a.contribution)
            .then(a.pollutant.cmp(&b.pollutant))
    });

    Ok(ContributionBreakdown::from_sorted(entries))
}
