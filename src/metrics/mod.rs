//! Prometheus metrics

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub aqi_aggregations_total: IntCounter,
    pub aqi_predictions_total: IntCounter,
    pub aqi_prediction_failures_total: IntCounter,
    pub model_loads_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests handled by method and status"),
            &["method", "status"],
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let aqi_aggregations_total =
            IntCounter::new("aqi_aggregations_total", "Samples aggregated into an overall AQI")?;
        let aqi_predictions_total =
            IntCounter::new("aqi_predictions_total", "Model-based AQI predictions served")?;
        let aqi_prediction_failures_total = IntCounter::new(
            "aqi_prediction_failures_total",
            "Prediction requests that could not be served",
        )?;
        let model_loads_total = IntCounterVec::new(
            Opts::new("model_loads_total", "Model load attempts by outcome"),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(aqi_aggregations_total.clone()))?;
        registry.register(Box::new(aqi_predictions_total.clone()))?;
        registry.register(Box::new(aqi_prediction_failures_total.clone()))?;
        registry.register(Box::new(model_loads_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            aqi_aggregations_total,
            aqi_predictions_total,
            aqi_prediction_failures_total,
            model_loads_total,
        })
    }

    /// Prometheus text exposition of every registered metric
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
