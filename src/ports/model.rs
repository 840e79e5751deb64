//! Model Port - Opaque Opinion Classifier Interface
//!
//! The pre-trained classifier is an external capability: it declares the
//! feature names it was trained on and maps a feature matrix to one class
//! code per row. Its internals are never inspected.

use crate::domain::encoder::LabelEncoder;
use crate::domain::error::AnalysisError;
use crate::domain::features::FeatureMatrix;

/// A pre-trained classifier scoring feature rows.
#[cfg_attr(test, mockall::automock)]
pub trait OpinionModel {
  /// Feature names the model was trained on, in its input order.
  fn feature_names(&self) -> Vec<String>;

  /// Predict one class code per matrix row.
  ///
  /// Stateless from the caller's view: the same matrix always yields
  /// the same codes.
  fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<Vec<usize>>;
}

/// A loaded model together with the encoder fitted alongside it.
pub struct ModelBundle {
  /// The classifier.
  pub model: Box<dyn OpinionModel>,
  /// Class code → label mapping.
  pub encoder: LabelEncoder,
}

impl std::fmt::Debug for ModelBundle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ModelBundle")
      .field("features", &self.model.feature_names().len())
      .field("encoder", &self.encoder)
      .finish()
  }
}

/// Where model bundles come from (artifact file, registry, test stub).
#[cfg_attr(test, mockall::automock)]
pub trait ModelSource {
  /// Load the bundle.
  ///
  /// # Errors
  /// `AnalysisError::ModelUnavailable` when the artifact cannot be read.
  fn load(&self) -> Result<ModelBundle, AnalysisError>;
}
