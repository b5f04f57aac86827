//! Model-based AQI prediction: the model capability, the random-forest
//! artifact, the lazy model registry and the predict → classify → explain
//! pipeline.

pub mod forest;
pub mod model;
pub mod pipeline;
pub mod registry;

pub use forest::{ForestArtifact, ForestModel, ImputerParams, RegressionTree, TreeNode};
pub use model::AqiModel;
pub use pipeline::predict_aqi;
pub use registry::ModelRegistry;
