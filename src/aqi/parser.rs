//! Payload → `Sample` parsing
//!
//! Payloads map pollutant names to numbers, numeric strings or null. Unknown
//! names fail with `UnknownPollutant`; negative or non-numeric values fail
//! with `InvalidInput`. Null and empty strings mean "not reported". Two keys
//! naming the same pollutant (`PM2.5` and `pm2_5`, or differing only in case)
//! are rejected, even when one of them is null.

use crate::aqi::error::AqiError;
use crate::aqi::subindex::validate_concentration;
use crate::models::pollutant::Pollutant;
use crate::models::sample::Sample;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

pub fn parse_pollutant(name: &str) -> Result<Pollutant, AqiError> {
    name.parse()
}

pub fn parse_concentration_str(
    pollutant: Pollutant,
    value: &str,
) -> Result<Option<f64>, AqiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let concentration = trimmed.parse::<f64>().map_err(|_| {
        AqiError::invalid_input(format!("{}: '{}' is not a number", pollutant, value))
    })?;
    validate_concentration(pollutant, concentration).map(Some)
}

pub fn parse_concentration(pollutant: Pollutant, value: &Value) -> Result<Option<f64>, AqiError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            let concentration = number.as_f64().ok_or_else(|| {
                AqiError::invalid_input(format!("{}: {} is out of range", pollutant, number))
            })?;
            validate_concentration(pollutant, concentration).map(Some)
        }
        Value::String(s) => parse_concentration_str(pollutant, s),
        other => Err(AqiError::invalid_input(format!(
            "{}: expected a number, got {}",
            pollutant, other
        ))),
    }
}

/// Parse a JSON object payload
pub fn parse_sample(payload: &Map<String, Value>) -> Result<Sample, AqiError> {
    collect_sample(payload.iter().map(|(name, value)| -> Result<_, AqiError> {
        let pollutant = parse_pollutant(name)?;
        Ok((name.as_str(), pollutant, parse_concentration(pollutant, value)?))
    }))
}

/// Parse a string map, e.g. form fields or `KEY=VALUE` arguments
pub fn parse_sample_from_map(data: &HashMap<String, String>) -> Result<Sample, AqiError> {
    collect_sample(data.iter().map(|(name, value)| -> Result<_, AqiError> {
        let pollutant = parse_pollutant(name)?;
        Ok((name.as_str(), pollutant, parse_concentration_str(pollutant, value)?))
    }))
}

fn collect_sample<'a>(
    entries: impl Iterator<Item = Result<(&'a str, Pollutant, Option<f64>), AqiError>>,
) -> Result<Sample, AqiError> {
    let mut seen: BTreeMap<Pollutant, &'a str> = BTreeMap::new();
    let mut sample = Sample::new();
    for entry in entries {
        let (name, pollutant, concentration) = entry?;
        if let Some(previous) = seen.insert(pollutant, name) {
            return Err(AqiError::invalid_input(format!(
                "keys '{}' and '{}' both name {}",
                previous, name, pollutant
            )));
        }
        sample.set(pollutant, concentration);
    }
    Ok(sample)
}
