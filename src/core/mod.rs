//! HTTP surface over the AQI engine

pub mod http;

pub use http::*;
