//! Model Adapters - Pre-trained Classifier Loading
//!
//! Implements the `ModelSource` / `OpinionModel` ports on top of a JSON
//! artifact exported at training time.

pub mod artifact;

pub use artifact::{JsonModelSource, LinearOpinionModel, ModelArtifact};
