//! Test utilities for API server integration tests

use airwatch::core::http::{create_router, AppState, HealthStatus};
use airwatch::metrics::Metrics;
use airwatch::prediction::{AqiModel, ModelRegistry};
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub models: Arc<ModelRegistry>,
}

impl TestApiServer {
    /// Server whose model is already loaded
    pub fn with_model(model: Arc<dyn AqiModel>) -> Self {
        Self::with_registry(ModelRegistry::with_model(model))
    }

    /// Server whose model artifact does not exist
    pub fn without_model() -> Self {
        Self::with_registry(ModelRegistry::new(
            "/nonexistent/airwatch/random_forest_model.json",
            None,
        ))
    }

    fn with_registry(registry: ModelRegistry) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let models = Arc::new(registry.with_metrics(metrics.clone()));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            models: models.clone(),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            models,
        }
    }
}
