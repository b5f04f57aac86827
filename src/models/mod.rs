//! Shared data models spanning the engine layers.

pub mod aqi;
pub mod pollutant;
pub mod sample;

pub use aqi::{
    AggregateResult, AqiCategory, BreakpointRange, CategoryLabel, Contribution,
    ContributionBreakdown, FeatureImportances, PredictionResult, SubIndexResult,
};
pub use pollutant::Pollutant;
pub use sample::Sample;
