//! External collaborators the engine talks to.

pub mod artifact_source;

pub use artifact_source::{ArtifactSource, HttpArtifactSource};
