//! AirWatch AQI engine.
//!
//! Converts raw pollutant concentrations into an Air Quality Index through
//! breakpoint interpolation, aggregates sub-indices into an overall index,
//! classifies it into a severity category and explains model predictions in
//! the same sub-index units.

pub mod aqi;
pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod prediction;
pub mod services;

pub use aqi::AqiError;
