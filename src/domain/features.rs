//! Feature vocabulary, selection and the classifier input matrix.
//!
//! The 32 feature names are fixed: the classifier was trained on exactly
//! these column names (including the trailing space in
//! `Duran Varlıklar / Aktif `). `FEATURE_NAMES` lists them in the order
//! the classifier consumes them; `Feature` indexes into it.

use std::collections::BTreeSet;
use std::fmt;

use super::error::AnalysisError;
use super::ratios::EnrichedTable;

/// Classifier feature names, in model input order.
pub const FEATURE_NAMES: [&str; Feature::COUNT] = [
    "Altman Z-Skoru",
    "Finansal Kaldıraç",
    "Nakit Oranı",
    "Aktif Devir Hızı",
    "L Model Skoru",
    "Zmijewski Skoru",
    "Asit Test Oranı",
    "Özsermaye / Maddi Duran Varlıklar",
    "Faaliyet Kar Marjı",
    "Duran Varlıklar / Maddi Özkaynak",
    "Ticari Borçlar Devir Hızı",
    "Stok Devir Hızı",
    "Brüt Kar Marjı (%)",
    "Cari Oran",
    "Esas Faaliyet Karı / Kısa Vadeli Borç",
    "Esas Faaliyet Kar Marjı",
    "Özsermaye / Aktif",
    "Alacak Devir Hızı",
    "Borç Kaynak Oranı",
    "Net Kar Marjı",
    "Net Satışlar / Kısa Vade Borç",
    "Kısa Vade Borç / Özsermaye",
    "Kısa Vade Borç / Toplam Borç",
    "Kısa Vade Borç / Aktif",
    "Kısa Vade Borç / Dönen Varlık",
    "FAVÖK / Kısa Vade Borç",
    "Duran Varlıklar / Aktif ",
    "Dönen Varlıklar / Aktif (%)",
    "Dönen Varlıklar Devir Hızı",
    "Aktif Karlılık (%)",
    "ROCE Oranı",
    "Finansman Gider / Net Satış",
];

/// One derived ratio. Discriminants follow `FEATURE_NAMES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    AltmanZ,
    FinancialLeverage,
    CashRatio,
    AssetTurnover,
    LModel,
    Zmijewski,
    AcidTestRatio,
    EquityToTangibleFixedAssets,
    OperatingProfitMargin,
    FixedAssetsToTangibleEquity,
    PayablesTurnover,
    InventoryTurnover,
    GrossMargin,
    CurrentRatio,
    CoreOperatingProfitToShortTermDebt,
    CoreOperatingMargin,
    EquityToAssets,
    ReceivablesTurnover,
    DebtToEquity,
    NetMargin,
    NetSalesToShortTermDebt,
    ShortTermDebtToEquity,
    ShortTermDebtToTotalDebt,
    ShortTermDebtToAssets,
    ShortTermDebtToCurrentAssets,
    EbitdaProxyToShortTermDebt,
    FixedAssetsToAssets,
    CurrentAssetsToAssets,
    CurrentAssetsTurnover,
    ReturnOnAssets,
    RoceProxy,
    FinancingExpenseToNetSales,
}

impl Feature {
    pub const COUNT: usize = 32;

    /// Every feature, in model input order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AltmanZ,
        Self::FinancialLeverage,
        Self::CashRatio,
        Self::AssetTurnover,
        Self::LModel,
        Self::Zmijewski,
        Self::AcidTestRatio,
        Self::EquityToTangibleFixedAssets,
        Self::OperatingProfitMargin,
        Self::FixedAssetsToTangibleEquity,
        Self::PayablesTurnover,
        Self::InventoryTurnover,
        Self::GrossMargin,
        Self::CurrentRatio,
        Self::CoreOperatingProfitToShortTermDebt,
        Self::CoreOperatingMargin,
        Self::EquityToAssets,
        Self::ReceivablesTurnover,
        Self::DebtToEquity,
        Self::NetMargin,
        Self::NetSalesToShortTermDebt,
        Self::ShortTermDebtToEquity,
        Self::ShortTermDebtToTotalDebt,
        Self::ShortTermDebtToAssets,
        Self::ShortTermDebtToCurrentAssets,
        Self::EbitdaProxyToShortTermDebt,
        Self::FixedAssetsToAssets,
        Self::CurrentAssetsToAssets,
        Self::CurrentAssetsTurnover,
        Self::ReturnOnAssets,
        Self::RoceProxy,
        Self::FinancingExpenseToNetSales,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Exact column name the classifier expects.
    pub const fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Look a feature up by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ────────────────────────────────────────────
// Vocabulary check
// ────────────────────────────────────────────

/// Check a model's declared feature names against the vocabulary by set
/// equality and return them as features, in the model's order.
///
/// # Errors
/// `FeatureVocabularyMismatch` when a name is missing, unknown or repeated.
pub fn verify_vocabulary(declared: &[String]) -> Result<Vec<Feature>, AnalysisError> {
    let expected: BTreeSet<&str> = FEATURE_NAMES.iter().copied().collect();
    let mut seen = BTreeSet::new();
    let mut unexpected = Vec::new();

    for name in declared {
        if !expected.contains(name.as_str()) || !seen.insert(name.as_str()) {
            unexpected.push(name.clone());
        }
    }

    let missing: Vec<String> = expected
        .difference(&seen)
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(AnalysisError::FeatureVocabularyMismatch {
            missing,
            unexpected,
        });
    }

    Ok(declared
        .iter()
        .filter_map(|n| Feature::from_name(n))
        .collect())
}

// ────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────

/// The 32 features of one surviving row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Position of the row in the raw table.
    pub row_index: usize,
    /// Values in `Feature::ALL` order.
    pub values: [f64; Feature::COUNT],
}

impl FeatureRow {
    pub const fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

/// Rows whose 32 features are all present, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSelection {
    rows: Vec<FeatureRow>,
    total_rows: usize,
}

impl FeatureSelection {
    /// Select the feature columns and drop rows with any null feature.
    ///
    /// # Errors
    /// `NoAnalyzableRows` when no row survives.
    pub fn from_enriched(table: &EnrichedTable<'_>) -> Result<Self, AnalysisError> {
        let rows: Vec<FeatureRow> = table
            .ratios()
            .iter()
            .enumerate()
            .filter_map(|(row_index, ratios)| {
                ratios
                    .feature_values()
                    .map(|values| FeatureRow { row_index, values })
            })
            .collect();

        if rows.is_empty() {
            return Err(AnalysisError::NoAnalyzableRows {
                total_rows: table.len(),
            });
        }

        Ok(Self {
            rows,
            total_rows: table.len(),
        })
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in the enriched table before filtering.
    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows dropped for having at least one null feature.
    pub fn skipped_rows(&self) -> usize {
        self.total_rows - self.rows.len()
    }

    /// Lay the selection out as a matrix whose columns follow `order`.
    pub fn to_matrix(&self, order: &[Feature]) -> FeatureMatrix {
        FeatureMatrix {
            columns: order.iter().map(|f| f.name().to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| order.iter().map(|f| r.get(*f)).collect())
                .collect(),
        }
    }
}

/// Dense classifier input: named columns, one row per surviving entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_all_matches_index() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
            assert_eq!(Feature::from_name(feature.name()), Some(*feature));
        }
    }

    #[test]
    fn test_names_unique() {
        let set: BTreeSet<_> = FEATURE_NAMES.iter().collect();
        assert_eq!(set.len(), Feature::COUNT);
    }

    #[test]
    fn test_trailing_space_is_part_of_name() {
        assert_eq!(Feature::FixedAssetsToAssets.name(), "Duran Varlıklar / Aktif ");
        assert_eq!(Feature::from_name("Duran Varlıklar / Aktif"), None);
    }

    #[test]
    fn test_vocabulary_accepts_any_order() {
        let mut names = vocabulary();
        names.reverse();
        let order = verify_vocabulary(&names).unwrap();
        assert_eq!(order.first(), Some(&Feature::FinancingExpenseToNetSales));
        assert_eq!(order.len(), Feature::COUNT);
    }

    #[test]
    fn test_vocabulary_rejects_trimmed_name() {
        let names: Vec<String> = vocabulary().into_iter().map(|n| n.trim().to_string()).collect();
        let err = verify_vocabulary(&names).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::FeatureVocabularyMismatch {
                missing: vec!["Duran Varlıklar / Aktif ".to_string()],
                unexpected: vec!["Duran Varlıklar / Aktif".to_string()],
            }
        );
    }

    #[test]
    fn test_vocabulary_rejects_duplicates_and_gaps() {
        let mut names = vocabulary();
        names[1] = names[0].clone();
        let err = verify_vocabulary(&names).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::FeatureVocabularyMismatch {
                missing: vec!["Finansal Kaldıraç".to_string()],
                unexpected: vec!["Altman Z-Skoru".to_string()],
            }
        );
    }

    #[test]
    fn test_matrix_follows_requested_order() {
        let mut values = [0.0; Feature::COUNT];
        values[Feature::CurrentRatio.index()] = 2.5;
        values[Feature::AltmanZ.index()] = 1.0;
        let selection = FeatureSelection {
            rows: vec![FeatureRow {
                row_index: 0,
                values,
            }],
            total_rows: 2,
        };
        let matrix = selection.to_matrix(&[Feature::CurrentRatio, Feature::AltmanZ]);
        assert_eq!(matrix.columns(), ["Cari Oran", "Altman Z-Skoru"]);
        assert_eq!(matrix.rows(), [vec![2.5, 1.0]]);
        assert_eq!(selection.skipped_rows(), 1);
    }
}
