pub mod artifacts;
pub mod scenario;

pub use artifacts::{ArtifactLayout, capture_failure};
