use crate::aqi::AqiError;
use crate::models::aqi::FeatureImportances;
use crate::models::sample::Sample;

/// Trained regression model, consumed as an opaque capability
pub trait AqiModel: Send + Sync {
    /// Predicted overall index for a sample. Missing pollutants are the
    /// model's concern (imputation or otherwise).
    fn predict(&self, sample: &Sample) -> Result<f64, AqiError>;

    /// Non-negative weight per feature the model uses
    fn feature_importances(&self) -> FeatureImportances;
}
