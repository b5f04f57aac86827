use crate::models::pollutant::Pollutant;
use serde::Serialize;
use std::collections::BTreeMap;

/// Concentrations reported for one location and moment.
///
/// Pollutants a sensor did not report are simply absent. Entries are kept in
/// pollutant priority order, so nothing downstream depends on the order in
/// which a payload listed its keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    concentrations: BTreeMap<Pollutant, f64>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pollutant: Pollutant, concentration: f64) -> Self {
        self.concentrations.insert(pollutant, concentration);
        self
    }

    /// Set or clear a concentration; `None` marks the pollutant as unreported
    pub fn set(&mut self, pollutant: Pollutant, concentration: Option<f64>) {
        match concentration {
            Some(value) => {
                self.concentrations.insert(pollutant, value);
            }
            None => {
                self.concentrations.remove(&pollutant);
            }
        }
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.concentrations.get(&pollutant).copied()
    }

    pub fn contains(&self, pollutant: Pollutant) -> bool {
        self.concentrations.contains_key(&pollutant)
    }

    /// Present concentrations in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.concentrations.iter().map(|(p, c)| (*p, *c))
    }

    pub fn len(&self) -> usize {
        self.concentrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }
}

impl FromIterator<(Pollutant, f64)> for Sample {
    fn from_iter<I: IntoIterator<Item = (Pollutant, f64)>>(iter: I) -> Self {
        Self {
            concentrations: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Pollutant, Option<f64>)> for Sample {
    fn from_iter<I: IntoIterator<Item = (Pollutant, Option<f64>)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (pollutant, concentration) in iter {
            sample.set(pollutant, concentration);
        }
        sample
    }
}
