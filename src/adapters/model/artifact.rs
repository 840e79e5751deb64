//! Model Artifact - JSON Linear Classifier Bundle
//!
//! Loads a pre-trained bundle exported from the training pipeline:
//! an optional standard scaler, per-class linear coefficients and
//! intercepts (argmax decision), and the label encoder classes.
//!
//! ```json
//! {
//!   "feature_names": ["Altman Z-Skoru", "..."],
//!   "scaler": { "mean": [0.0], "scale": [1.0] },
//!   "coefficients": [[0.1], [-0.2], [0.05]],
//!   "intercepts": [0.0, 0.1, -0.1],
//!   "classes": ["Olumlu", "Şartlı Olumlu", "Olumsuz"]
//! }
//! ```
//!
//! A single coefficient row with two classes is a binary model: class 1
//! when the decision value is positive.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domain::encoder::LabelEncoder;
use crate::domain::error::AnalysisError;
use crate::domain::features::FeatureMatrix;
use crate::ports::model::{ModelBundle, ModelSource, OpinionModel};

/// Standardisation applied before the linear layer: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk bundle layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    pub classes: LabelEncoder,
}

impl ModelArtifact {
    /// Check that every array agrees with the declared feature count.
    fn validate(&self) -> Result<()> {
        let width = self.feature_names.len();
        if width == 0 {
            bail!("artifact declares no features");
        }
        if self.coefficients.is_empty() {
            bail!("artifact has no coefficient rows");
        }
        if let Some(row) = self.coefficients.iter().position(|r| r.len() != width) {
            bail!("coefficient row {row} does not have {width} values");
        }
        if self.intercepts.len() != self.coefficients.len() {
            bail!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            );
        }
        let classes = self.classes.classes().len();
        let binary = self.coefficients.len() == 1 && classes == 2;
        if !binary && classes != self.coefficients.len() {
            bail!(
                "{classes} classes for {} coefficient rows",
                self.coefficients.len()
            );
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != width || scaler.scale.len() != width {
                bail!("scaler does not have {width} means and scales");
            }
        }
        Ok(())
    }
}

/// Linear multi-class classifier built from a `ModelArtifact`.
#[derive(Debug, Clone)]
pub struct LinearOpinionModel {
    feature_names: Vec<String>,
    scaler: Option<StandardScaler>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearOpinionModel {
    fn decide(&self, row: &[f64]) -> usize {
        let scaled: Vec<f64> = match &self.scaler {
            Some(s) => row
                .iter()
                .zip(s.mean.iter().zip(&s.scale))
                .map(|(x, (m, sc))| if *sc == 0.0 { x - m } else { (x - m) / sc })
                .collect(),
            None => row.to_vec(),
        };

        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| w.iter().zip(&scaled).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        if scores.len() == 1 {
            return usize::from(scores[0] > 0.0);
        }

        // First maximum wins ties.
        let mut best = 0;
        for (i, s) in scores.iter().enumerate().skip(1) {
            if *s > scores[best] {
                best = i;
            }
        }
        best
    }
}

impl OpinionModel for LinearOpinionModel {
    fn feature_names(&self) -> Vec<String> {
        self.feature_names.clone()
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<usize>> {
        if features.columns() != self.feature_names.as_slice() {
            bail!("feature matrix columns are not in model order");
        }
        Ok(features.rows().iter().map(|row| self.decide(row)).collect())
    }
}

/// Loads the bundle from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonModelSource {
    path: PathBuf,
}

impl JsonModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: impl ToString) -> AnalysisError {
        AnalysisError::ModelUnavailable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a bundle from an already parsed artifact.
    ///
    /// # Errors
    /// `ModelUnavailable` when the artifact arrays are inconsistent.
    pub fn bundle(&self, artifact: ModelArtifact) -> Result<ModelBundle, AnalysisError> {
        artifact.validate().map_err(|e| self.unavailable(e))?;

        let model = LinearOpinionModel {
            feature_names: artifact.feature_names,
            scaler: artifact.scaler,
            coefficients: artifact.coefficients,
            intercepts: artifact.intercepts,
        };
        Ok(ModelBundle {
            model: Box::new(model),
            encoder: artifact.classes,
        })
    }
}

impl ModelSource for JsonModelSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<ModelBundle, AnalysisError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|e| self.unavailable(e))?;
        let bundle = self.bundle(artifact)?;

        info!(
            features = bundle.model.feature_names().len(),
            classes = bundle.encoder.classes().len(),
            "Model artifact loaded"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{FEATURE_NAMES, Feature, verify_vocabulary};

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
    }

    /// Three classes keyed on the current ratio alone.
    fn artifact() -> ModelArtifact {
        let width = Feature::COUNT;
        let cr = Feature::CurrentRatio.index();
        let mut low = vec![0.0; width];
        let mut high = vec![0.0; width];
        low[cr] = -1.0;
        high[cr] = 1.0;
        ModelArtifact {
            feature_names: names(),
            scaler: None,
            coefficients: vec![low, vec![0.0; width], high],
            intercepts: vec![0.0, 0.5, -2.0],
            classes: LabelEncoder::new(vec!["Olumsuz".into(), "Şartlı".into(), "Olumlu".into()]),
        }
    }

    fn matrix(current_ratios: &[f64]) -> FeatureMatrix {
        use crate::domain::ratios::compute_ratios;
        use crate::domain::statement::RawTable;
        use crate::domain::{FeatureSelection, RawField};

        // Build a real selection so the matrix goes through the same path.
        let columns: Vec<String> = RawField::ALL.iter().map(|f| f.key().to_string()).collect();
        let rows = current_ratios
            .iter()
            .map(|cr| {
                RawField::ALL
                    .iter()
                    .map(|f| match f {
                        RawField::CurrentAssets => cr.to_string(),
                        RawField::ShortTermLiabilities => "1".to_string(),
                        _ => "0".to_string(),
                    })
                    .collect()
            })
            .collect();
        let table = RawTable::new(columns, rows);
        let enriched = compute_ratios(&table).unwrap();
        let selection = FeatureSelection::from_enriched(&enriched).unwrap();
        selection.to_matrix(&verify_vocabulary(&names()).unwrap())
    }

    #[test]
    fn test_argmax_decision() {
        let bundle = JsonModelSource::new("mem").bundle(artifact()).unwrap();
        let codes = bundle.model.predict(&matrix(&[-3.0, 1.0, 4.0])).unwrap();
        assert_eq!(codes, vec![0, 1, 2]);
        let labels = bundle.encoder.inverse_transform(&codes).unwrap();
        assert_eq!(labels, ["Olumsuz", "Şartlı", "Olumlu"]);
    }

    #[test]
    fn test_scaler_applied() {
        let mut a = artifact();
        let mut mean = vec![0.0; Feature::COUNT];
        mean[Feature::CurrentRatio.index()] = 10.0;
        a.scaler = Some(StandardScaler {
            mean,
            scale: vec![1.0; Feature::COUNT],
        });
        let bundle = JsonModelSource::new("mem").bundle(a).unwrap();
        // 4 - 10 = -6 → lowest class.
        assert_eq!(bundle.model.predict(&matrix(&[4.0])).unwrap(), vec![0]);
    }

    #[test]
    fn test_binary_model() {
        let mut a = artifact();
        a.coefficients.truncate(1);
        a.intercepts.truncate(1);
        a.classes = LabelEncoder::new(vec!["Olumlu".into(), "Olumsuz".into()]);
        let bundle = JsonModelSource::new("mem").bundle(a).unwrap();
        // Weight -1 on the current ratio: positive decision only when it is negative.
        assert_eq!(bundle.model.predict(&matrix(&[-2.0, 2.0])).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_inconsistent_artifact_unavailable() {
        let mut a = artifact();
        a.intercepts.pop();
        let err = JsonModelSource::new("m.json").bundle(a).unwrap_err();
        assert!(matches!(err, AnalysisError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_missing_file_unavailable() {
        let err = JsonModelSource::new("no/such/model.json").load().unwrap_err();
        match err {
            AnalysisError::ModelUnavailable { path, .. } => assert_eq!(path, "no/such/model.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let a = artifact();
        let json = serde_json::json!({
            "feature_names": a.feature_names,
            "coefficients": a.coefficients,
            "intercepts": a.intercepts,
            "classes": ["Olumsuz", "Şartlı", "Olumlu"],
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let bundle = JsonModelSource::new(&path).load().unwrap();
        assert_eq!(bundle.model.feature_names().len(), Feature::COUNT);
        assert_eq!(bundle.encoder.classes().len(), 3);
    }

    #[test]
    fn test_rejects_reordered_matrix() {
        let mut a = artifact();
        a.feature_names.reverse();
        let bundle = JsonModelSource::new("mem").bundle(a).unwrap();
        assert!(bundle.model.predict(&matrix(&[1.0])).is_err());
    }
}
