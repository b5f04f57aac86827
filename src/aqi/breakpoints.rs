//! Concentration breakpoint tables
//!
//! The standard table follows the CPCB National Air Quality Index
//! breakpoints. Concentrations are in µg/m³, except CO in mg/m³. The index
//! scale is continuous: adjacent segments share their index endpoint, so a
//! boundary concentration gets the same value from either side.

use crate::aqi::error::AqiError;
use crate::models::aqi::BreakpointRange;
use crate::models::pollutant::Pollutant;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Index value at each segment boundary
const INDEX_POINTS: [f64; 7] = [0.0, 50.0, 100.0, 200.0, 300.0, 400.0, 500.0];

/// Concentration at each segment boundary. The last point is the nominal end
/// of the open-ended final segment.
const PM10_POINTS: [f64; 7] = [0.0, 50.0, 100.0, 250.0, 350.0, 430.0, 510.0];
const PM25_POINTS: [f64; 7] = [0.0, 30.0, 60.0, 90.0, 120.0, 250.0, 380.0];
const NO2_POINTS: [f64; 7] = [0.0, 40.0, 80.0, 180.0, 280.0, 400.0, 520.0];
const O3_POINTS: [f64; 7] = [0.0, 50.0, 100.0, 168.0, 208.0, 748.0, 1288.0];
const CO_POINTS: [f64; 7] = [0.0, 1.0, 2.0, 10.0, 17.0, 34.0, 51.0];
const SO2_POINTS: [f64; 7] = [0.0, 40.0, 80.0, 380.0, 800.0, 1600.0, 2400.0];
const NH3_POINTS: [f64; 7] = [0.0, 200.0, 400.0, 800.0, 1200.0, 1800.0, 2400.0];

static STANDARD: OnceLock<BreakpointTable> = OnceLock::new();

/// Per-pollutant ordered breakpoint segments
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    ranges: BTreeMap<Pollutant, Vec<BreakpointRange>>,
}

impl BreakpointTable {
    /// Process-wide standard table, built on first use
    pub fn standard() -> &'static BreakpointTable {
        STANDARD.get_or_init(Self::cpcb)
    }

    fn cpcb() -> Self {
        let mut ranges = BTreeMap::new();
        for (pollutant, points) in [
            (Pollutant::Pm25, &PM25_POINTS),
            (Pollutant::Pm10, &PM10_POINTS),
            (Pollutant::No2, &NO2_POINTS),
            // NOx shares the NO2 breakpoints
            (Pollutant::Nox, &NO2_POINTS),
            (Pollutant::Nh3, &NH3_POINTS),
            (Pollutant::Co, &CO_POINTS),
            (Pollutant::So2, &SO2_POINTS),
            (Pollutant::O3, &O3_POINTS),
        ] {
            ranges.insert(pollutant, segments(pollutant, points, &INDEX_POINTS));
        }
        Self { ranges }
    }

    /// Build a custom table from per-pollutant segment lists.
    ///
    /// Each list must start at zero concentration, be ascending, contiguous,
    /// non-overlapping and monotonic in index, and end with exactly one
    /// open-ended segment.
    pub fn with_ranges(
        ranges: impl IntoIterator<Item = (Pollutant, Vec<BreakpointRange>)>,
    ) -> Result<Self, AqiError> {
        let table = Self {
            ranges: ranges.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Build a custom table from boundary points, like the standard one
    pub fn from_points(
        points: impl IntoIterator<Item = (Pollutant, Vec<f64>, Vec<f64>)>,
    ) -> Result<Self, AqiError> {
        let mut ranges = BTreeMap::new();
        for (pollutant, concentrations, indices) in points {
            if concentrations.len() != indices.len() || concentrations.len() < 2 {
                return Err(AqiError::invalid_input(format!(
                    "{}: need matching concentration/index points, got {} and {}",
                    pollutant,
                    concentrations.len(),
                    indices.len()
                )));
            }
            ranges.insert(pollutant, segments(pollutant, &concentrations, &indices));
        }
        Self::with_ranges(ranges)
    }

    pub fn validate(&self) -> Result<(), AqiError> {
        for (pollutant, ranges) in &self.ranges {
            validate_ranges(*pollutant, ranges)?;
        }
        Ok(())
    }

    /// Ordered segments for a pollutant
    pub fn ranges_for(&self, pollutant: Pollutant) -> Result<&[BreakpointRange], AqiError> {
        self.ranges
            .get(&pollutant)
            .map(Vec::as_slice)
            .ok_or_else(|| AqiError::UnknownPollutant(pollutant.to_string()))
    }

    pub fn has_breakpoints(&self, pollutant: Pollutant) -> bool {
        self.ranges.contains_key(&pollutant)
    }

    /// Pollutants that carry breakpoints, in priority order
    pub fn pollutants(&self) -> impl Iterator<Item = Pollutant> + '_ {
        self.ranges.keys().copied()
    }

    /// Segment containing `concentration`.
    ///
    /// A boundary value belongs to the segment that starts at it. Values past
    /// the last boundary resolve to the open-ended final segment.
    pub fn locate(
        &self,
        pollutant: Pollutant,
        concentration: f64,
    ) -> Result<&BreakpointRange, AqiError> {
        let ranges = self.ranges_for(pollutant)?;
        let position = ranges.partition_point(|r| r.concentration_high <= concentration);
        let range = ranges
            .get(position.min(ranges.len().saturating_sub(1)))
            .ok_or_else(|| AqiError::UnknownPollutant(pollutant.to_string()))?;
        debug_assert!(
            concentration < 0.0 || range.contains(concentration),
            "{} located outside {:?}",
            concentration,
            range
        );
        Ok(range)
    }
}

fn segments(pollutant: Pollutant, concentrations: &[f64], indices: &[f64]) -> Vec<BreakpointRange> {
    let count = concentrations.len().saturating_sub(1);
    (0..count)
        .map(|i| BreakpointRange {
            pollutant,
            concentration_low: concentrations[i],
            concentration_high: concentrations[i + 1],
            index_low: indices[i],
            index_high: indices[i + 1],
            open_ended: i + 1 == count,
        })
        .collect()
}

fn validate_ranges(pollutant: Pollutant, ranges: &[BreakpointRange]) -> Result<(), AqiError> {
    let invalid = |reason: String| AqiError::invalid_input(format!("{} breakpoints: {}", pollutant, reason));

    let first = ranges.first().ok_or_else(|| invalid("no ranges".to_string()))?;
    if first.concentration_low != 0.0 {
        return Err(invalid(format!(
            "first range starts at {} instead of 0",
            first.concentration_low
        )));
    }
    if first.index_low < 0.0 {
        return Err(invalid(format!("negative index {}", first.index_low)));
    }

    for (i, range) in ranges.iter().enumerate() {
        let values = [
            range.concentration_low,
            range.concentration_high,
            range.index_low,
            range.index_high,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid(format!("range {} has a non-finite bound", i)));
        }
        if range.pollutant != pollutant {
            return Err(invalid(format!("range {} is tagged {}", i, range.pollutant)));
        }
        if range.concentration_high <= range.concentration_low {
            return Err(invalid(format!("range {} is empty or inverted", i)));
        }
        if range.index_high < range.index_low {
            return Err(invalid(format!("range {} decreases in index", i)));
        }
        let is_last = i + 1 == ranges.len();
        if range.open_ended != is_last {
            return Err(invalid("only the final range may be open-ended, and it must be".to_string()));
        }
    }

    for pair in ranges.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.concentration_low != lower.concentration_high {
            return Err(invalid(format!(
                "gap or overlap between {} and {}",
                lower.concentration_high, upper.concentration_low
            )));
        }
        if upper.index_low < lower.index_high {
            return Err(invalid(format!(
                "index drops from {} to {} at concentration {}",
                lower.index_high, upper.index_low, upper.concentration_low
            )));
        }
    }

    Ok(())
}
