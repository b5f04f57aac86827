//! Lazily loaded model handle
//!
//! The model is loaded at most once per process: on first prediction, or by
//! a background task started with the server. When the local artifact is
//! missing (or truncated) and a remote source is configured, the artifact is
//! downloaded first and written atomically next to its final path.

use crate::aqi::AqiError;
use crate::config::ModelConfig;
use crate::metrics::Metrics;
use crate::prediction::forest::ForestModel;
use crate::prediction::model::AqiModel;
use crate::services::artifact_source::{ArtifactSource, HttpArtifactSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Artifacts smaller than this are treated as missing
const MIN_ARTIFACT_BYTES: u64 = 10;

pub struct ModelRegistry {
    model_path: PathBuf,
    source: Option<Arc<dyn ArtifactSource>>,
    model: RwLock<Option<Arc<dyn AqiModel>>>,
    load_lock: Mutex<()>,
    metrics: Option<Arc<Metrics>>,
}

impl ModelRegistry {
    pub fn new(model_path: impl Into<PathBuf>, source: Option<Arc<dyn ArtifactSource>>) -> Self {
        Self {
            model_path: model_path.into(),
            source,
            model: RwLock::new(None),
            load_lock: Mutex::new(()),
            metrics: None,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, reqwest::Error> {
        let source = match &config.model_url {
            Some(url) => {
                let source = HttpArtifactSource::new(url.clone(), config.download_timeout)?
                    .with_max_retries(config.download_retries);
                Some(Arc::new(source) as Arc<dyn ArtifactSource>)
            }
            None => None,
        };
        Ok(Self::new(config.model_path(), source))
    }

    /// Registry holding an already constructed model
    pub fn with_model(model: Arc<dyn AqiModel>) -> Self {
        let mut registry = Self::new(PathBuf::new(), None);
        registry.model = RwLock::new(Some(model));
        registry
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub async fn current(&self) -> Option<Arc<dyn AqiModel>> {
        self.model.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.model.read().await.is_some()
    }

    /// Load without waiting: `Ok(None)` when another task is already loading
    pub async fn try_load(&self) -> Result<Option<Arc<dyn AqiModel>>, AqiError> {
        if let Some(model) = self.current().await {
            return Ok(Some(model));
        }
        let Ok(_guard) = self.load_lock.try_lock() else {
            return Ok(None);
        };
        self.load_locked().await.map(Some)
    }

    /// Return the model, loading it (and waiting for concurrent loads) if needed
    pub async fn load_if_needed(&self) -> Result<Arc<dyn AqiModel>, AqiError> {
        if let Some(model) = self.current().await {
            return Ok(model);
        }
        let _guard = self.load_lock.lock().await;
        self.load_locked().await
    }

    /// Start loading after `delay` without blocking the caller
    pub fn spawn_background_load(self: &Arc<Self>, delay: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        info!(delay_seconds = delay.as_secs(), "Background model load scheduled");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = registry.load_if_needed().await {
                error!(error = %e, "Background model load failed");
            }
        })
    }

    async fn load_locked(&self) -> Result<Arc<dyn AqiModel>, AqiError> {
        // Another task may have finished loading while we waited for the lock.
        if let Some(model) = self.current().await {
            return Ok(model);
        }

        let result = self.load_from_disk().await;
        if let Some(metrics) = &self.metrics {
            let outcome = if result.is_ok() { "success" } else { "failure" };
            metrics.model_loads_total.with_label_values(&[outcome]).inc();
        }

        let model = result?;
        *self.model.write().await = Some(Arc::clone(&model));
        info!(path = %self.model_path.display(), "Model loaded and ready");
        Ok(model)
    }

    async fn load_from_disk(&self) -> Result<Arc<dyn AqiModel>, AqiError> {
        if self.artifact_missing().await {
            match &self.source {
                Some(source) => {
                    if let Err(e) = self.download(source.as_ref()).await {
                        warn!(
                            source = %source.location(),
                            error = %e,
                            "Could not download model artifact, falling back to local file"
                        );
                    }
                }
                None => {
                    return Err(AqiError::model_unavailable(format!(
                        "no artifact at {} and no download URL configured",
                        self.model_path.display()
                    )));
                }
            }
        }

        let bytes = tokio::fs::read(&self.model_path).await.map_err(|e| {
            AqiError::model_unavailable(format!(
                "cannot read {}: {}",
                self.model_path.display(),
                e
            ))
        })?;
        let model = ForestModel::from_json(&bytes)?;
        info!(
            features = model.features().len(),
            trees = model.tree_count(),
            imputer = model.imputer_strategy(),
            "Model artifact parsed"
        );
        Ok(Arc::new(model))
    }

    async fn artifact_missing(&self) -> bool {
        match tokio::fs::metadata(&self.model_path).await {
            Ok(meta) => meta.len() < MIN_ARTIFACT_BYTES,
            Err(_) => true,
        }
    }

    async fn download(&self, source: &dyn ArtifactSource) -> Result<(), AqiError> {
        let bytes = source
            .fetch()
            .await
            .map_err(|e| AqiError::model_unavailable(format!("download failed: {}", e)))?;

        if let Some(parent) = self.model_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let tmp = self.model_path.with_extension("tmp");
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(e));
        }
        tokio::fs::rename(&tmp, &self.model_path).await.map_err(io_error)?;
        info!(path = %self.model_path.display(), bytes = bytes.len(), "Model artifact stored");
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> AqiError {
    AqiError::model_unavailable(format!("artifact I/O failed: {}", e))
}
