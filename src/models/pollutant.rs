//! Pollutant identities known to the engine

use crate::aqi::AqiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported pollutants.
///
/// Declaration order is the dominant-pollutant priority order: particulate
/// matter first, then gases, then organics. The derived `Ord` follows it, so
/// ordered containers keyed by `Pollutant` iterate in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "NOx")]
    Nox,
    #[serde(rename = "NH3")]
    Nh3,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "O3")]
    O3,
    Benzene,
    Toluene,
    Xylene,
}

impl Pollutant {
    /// Every pollutant, in priority order
    pub const ALL: [Pollutant; 12] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No,
        Pollutant::No2,
        Pollutant::Nox,
        Pollutant::Nh3,
        Pollutant::Co,
        Pollutant::So2,
        Pollutant::O3,
        Pollutant::Benzene,
        Pollutant::Toluene,
        Pollutant::Xylene,
    ];

    /// Wire name used in payloads and model artifacts
    pub fn name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No => "NO",
            Pollutant::No2 => "NO2",
            Pollutant::Nox => "NOx",
            Pollutant::Nh3 => "NH3",
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO2",
            Pollutant::O3 => "O3",
            Pollutant::Benzene => "Benzene",
            Pollutant::Toluene => "Toluene",
            Pollutant::Xylene => "Xylene",
        }
    }

    /// Key used by air-pollution feeds (`pm2_5`, `nh3`, ...)
    fn feed_alias(&self) -> Option<&'static str> {
        match self {
            Pollutant::Pm25 => Some("pm2_5"),
            _ => None,
        }
    }


    /// Resolve a wire name, ignoring ASCII case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| {
            p.name().eq_ignore_ascii_case(name)
                || p.feed_alias().is_some_and(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AqiError::UnknownPollutant(s.to_string()))
    }
}
