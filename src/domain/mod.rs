//! Domain layer - Ratio Engine and Classifier Inputs.
//!
//! Pure statement logic: raw field vocabulary, null-safe arithmetic,
//! the 32-ratio engine with its scoring models, feature selection and
//! label decoding. No I/O happens here; adapters feed `RawTable`s in
//! and take `AnnotatedTable`s out.

pub mod encoder;
pub mod error;
pub mod features;
pub mod fields;
pub mod figure;
pub mod prediction;
pub mod ratios;
pub mod scoring;
pub mod statement;

// Re-export core types for convenience
pub use encoder::LabelEncoder;
pub use error::AnalysisError;
pub use features::{FEATURE_NAMES, Feature, FeatureMatrix, FeatureSelection};
pub use fields::RawField;
pub use figure::{Figure, safe_div, safe_div_series};
pub use prediction::{AnnotatedTable, PREDICTION_COLUMN};
pub use ratios::{EnrichedTable, RatioSet, compute_ratios};
pub use scoring::ScoreCard;
pub use statement::{FinancialRecord, RawTable};
