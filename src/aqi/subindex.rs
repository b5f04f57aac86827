//! Sub-index calculation
//!
//! sub_index = index_low + (index_high - index_low) / (conc_high - conc_low) * (conc - conc_low)

use crate::aqi::breakpoints::BreakpointTable;
use crate::aqi::error::AqiError;
use crate::models::aqi::{BreakpointRange, SubIndexResult};
use crate::models::pollutant::Pollutant;

/// Sub-index for a concentration using the standard table
pub fn compute_sub_index(pollutant: Pollutant, concentration: f64) -> Result<f64, AqiError> {
    sub_index_with(BreakpointTable::standard(), pollutant, concentration).map(|r| r.value)
}

/// Sub-index plus the segment it came from, using the standard table
pub fn compute_sub_index_result(
    pollutant: Pollutant,
    concentration: f64,
) -> Result<SubIndexResult, AqiError> {
    sub_index_with(BreakpointTable::standard(), pollutant, concentration)
}

pub fn sub_index_with(
    table: &BreakpointTable,
    pollutant: Pollutant,
    concentration: f64,
) -> Result<SubIndexResult, AqiError> {
    validate_concentration(pollutant, concentration)?;
    let range = table.locate(pollutant, concentration)?;
    let value = interpolate(range, concentration);
    // Extrapolating a steep top segment can overflow for huge inputs.
    if !value.is_finite() {
        return Err(AqiError::invalid_input(format!(
            "{} concentration {} is beyond the representable index range",
            pollutant, concentration
        )));
    }
    Ok(SubIndexResult {
        pollutant,
        value,
        range: *range,
    })
}

/// Linear interpolation inside a segment; extrapolates along the same slope
/// when `concentration` lies past an open-ended segment's nominal end.
pub fn interpolate(range: &BreakpointRange, concentration: f64) -> f64 {
    range.index_low + range.slope() * (concentration - range.concentration_low)
}

pub fn validate_concentration(pollutant: Pollutant, concentration: f64) -> Result<f64, AqiError> {
    if !concentration.is_finite() {
        return Err(AqiError::invalid_input(format!(
            "{} concentration must be a finite number, got {}",
            pollutant, concentration
        )));
    }
    if concentration < 0.0 {
        return Err(AqiError::invalid_input(format!(
            "{} concentration must be non-negative, got {}",
            pollutant, concentration
        )));
    }
    Ok(concentration)
}
