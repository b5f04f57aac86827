//! Axum server exposing the rule-based and model-based AQI paths

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::aqi::{aggregate, classify_optional, parse_sample, AqiError};
use crate::config::ServerConfig;
use crate::metrics::Metrics;
use crate::models::aqi::{AggregateResult, CategoryLabel, ContributionBreakdown, PredictionResult};
use crate::models::pollutant::Pollutant;
use crate::prediction::{predict_aqi, ModelRegistry};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub models: Arc<ModelRegistry>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error response: `{"success": false, "error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<AqiError> for ApiError {
    fn from(err: AqiError) -> Self {
        let status = match &err {
            AqiError::InvalidInput(_) | AqiError::UnknownPollutant(_) => StatusCode::BAD_REQUEST,
            AqiError::EmptySample => StatusCode::UNPROCESSABLE_ENTITY,
            AqiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct CurrentAqiResponse {
    success: bool,
    #[serde(flatten)]
    result: AggregateResult,
    computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    success: bool,
    predicted_aqi: f64,
    category_info: CategoryLabel,
    contributions: ContributionBreakdown,
    primary_factor: Option<Pollutant>,
    computed_at: DateTime<Utc>,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "airwatch-aqi-engine",
        "model_loaded": state.models.is_loaded().await,
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state
        .metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), status.as_str()])
        .inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

/// Rule-based current AQI for a pollutant payload
async fn current_aqi(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<CurrentAqiResponse>, ApiError> {
    let sample = parse_sample(&payload).map_err(|e| {
        warn!(error = %e, "Rejected AQI payload");
        e
    })?;
    let result = aggregate(&sample)?;
    state.metrics.aqi_aggregations_total.inc();

    info!(
        overall_index = result.overall_index,
        dominant = %result.dominant_pollutant,
        category = result.category.category.name(),
        "Current AQI computed"
    );

    Ok(Json(CurrentAqiResponse {
        success: true,
        result,
        computed_at: Utc::now(),
    }))
}

/// Model-based AQI with its contribution breakdown
async fn predicted_aqi(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let prediction = match run_prediction(&state, &payload).await {
        Ok(prediction) => prediction,
        Err(e) => {
            state.metrics.aqi_prediction_failures_total.inc();
            warn!(error = %e, "Prediction request failed");
            return Err(e.into());
        }
    };
    state.metrics.aqi_predictions_total.inc();

    info!(
        predicted_aqi = prediction.predicted_aqi,
        category = prediction.category.category.name(),
        primary_factor = ?prediction.primary_factor,
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        success: true,
        predicted_aqi: prediction.predicted_aqi,
        category_info: prediction.category,
        contributions: prediction.contributions,
        primary_factor: prediction.primary_factor,
        computed_at: Utc::now(),
    }))
}

async fn run_prediction(
    state: &AppState,
    payload: &Map<String, Value>,
) -> Result<PredictionResult, AqiError> {
    let sample = parse_sample(payload)?;
    let model = state.models.load_if_needed().await?;
    predict_aqi(model.as_ref(), &sample)
}

/// Category and presentation attributes for an index value.
///
/// A segment that is not a number gets the "N/A" label.
async fn category_for(Path(value): Path<String>) -> Result<Json<CategoryLabel>, ApiError> {
    let index = value.trim().parse::<f64>().ok();
    Ok(Json(classify_optional(index)?))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/aqi", post(current_aqi))
        .route("/api/predict_aqi", post(predicted_aqi))
        .route("/api/category/{value}", get(category_for))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    let models = Arc::new(ModelRegistry::from_config(&config.model)?.with_metrics(metrics.clone()));
    info!(
        path = %models.model_path().display(),
        remote = config.model.model_url.is_some(),
        "Model registry configured"
    );
    // Prediction routes load on demand if this has not finished yet.
    models.spawn_background_load(config.model.load_delay);

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time,
        models,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
