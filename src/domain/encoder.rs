//! Label encoder - class codes to audit opinion labels.

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Maps model class codes back to opinion labels ("Görüş Tipi").
///
/// Code `i` is `classes[i]`, matching the encoder fitted at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub const fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Known labels, indexed by class code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Translate class codes into labels.
    ///
    /// # Errors
    /// `UnknownClass` for the first code outside the fitted classes.
    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>, AnalysisError> {
        codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .cloned()
                    .ok_or(AnalysisError::UnknownClass {
                        code,
                        known: self.classes.len(),
                    })
            })
            .collect()
    }
}
