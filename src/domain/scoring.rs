//! Bankruptcy / credit scoring models.
//!
//! Altman Z, Zmijewski and the L-model combine intermediate ratios with
//! fixed published coefficients. Every intermediate goes through
//! `safe_div`, so an undefined denominator contributes `0` to the score
//! instead of leaving it undefined.

use super::fields::RawField;
use super::figure::{Figure, safe_div};
use super::statement::FinancialRecord;

/// Altman working-capital / earnings / activity terms over total assets
/// (X4 over total liabilities).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltmanTerms {
    /// (current assets − short-term liabilities) / total assets
    pub x1: Figure,
    /// (retained earnings + net income) / total assets
    pub x2: Figure,
    /// pre-tax income from continuing operations / total assets
    pub x3: Figure,
    /// total equity / total liabilities
    pub x4: Figure,
    /// net sales / total assets
    pub x5: Figure,
}

impl AltmanTerms {
    pub fn from_record(record: &FinancialRecord) -> Self {
        let total_assets = record.total_assets();
        let current_assets = record.get(RawField::CurrentAssets);
        let stl = record.get(RawField::ShortTermLiabilities);

        Self {
            x1: safe_div(current_assets - stl, total_assets),
            x2: safe_div(
                record.get(RawField::RetainedEarnings) + record.get(RawField::NetIncome),
                total_assets,
            ),
            x3: safe_div(record.get(RawField::PreTaxIncomeContinuingOps), total_assets),
            x4: safe_div(record.get(RawField::TotalEquity), record.total_liabilities()),
            x5: safe_div(record.get(RawField::NetSales), total_assets),
        }
    }

    /// Z = 1.2·X1 + 1.4·X2 + 3.3·X3 + 0.6·X4 + X5
    pub fn z_score(&self) -> Figure {
        1.2 * self.x1 + 1.4 * self.x2 + 3.3 * self.x3 + 0.6 * self.x4 + self.x5
    }
}

/// Zmijewski probit terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZmijewskiTerms {
    /// net income / total assets
    pub z1: Figure,
    /// total liabilities / total assets
    pub z2: Figure,
    /// current assets / short-term liabilities (raw magnitude, not %)
    pub z3: Figure,
}

impl ZmijewskiTerms {
    pub fn from_record(record: &FinancialRecord) -> Self {
        let total_assets = record.total_assets();
        Self {
            z1: safe_div(record.get(RawField::NetIncome), total_assets),
            z2: safe_div(record.total_liabilities(), total_assets),
            z3: safe_div(
                record.get(RawField::CurrentAssets),
                record.get(RawField::ShortTermLiabilities),
            ),
        }
    }

    /// −4.3 − 4.5·Z1 + 5.7·Z2 − 0.004·Z3
    ///
    /// The Z3 coefficient is three orders smaller than the others; keep it.
    pub fn score(&self) -> Figure {
        Figure::new(-4.3) - 4.5 * self.z1 + 5.7 * self.z2 - 0.004 * self.z3
    }
}

/// L-model terms: the Altman terms plus a liquidity and a leverage term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LModelTerms {
    pub altman: AltmanTerms,
    /// (cash / short-term liabilities) / total liabilities
    pub l6: Figure,
    /// total liabilities / total assets
    pub l7: Figure,
}

impl LModelTerms {
    pub fn from_record(record: &FinancialRecord, altman: AltmanTerms) -> Self {
        let total_liabilities = record.total_liabilities();
        let cash_ratio = safe_div(
            record.get(RawField::CashAndEquivalents),
            record.get(RawField::ShortTermLiabilities),
        );
        Self {
            altman,
            l6: safe_div(cash_ratio, total_liabilities),
            l7: safe_div(total_liabilities, record.total_assets()),
        }
    }

    /// −0.113·X1 + 0.238·X2 − 0.052·X3 − 0.051·X4 + 0.011·X5 + 0.729·L6 − 0.639·L7
    pub fn score(&self) -> Figure {
        let a = &self.altman;
        -0.113 * a.x1 + 0.238 * a.x2 - 0.052 * a.x3 - 0.051 * a.x4 + 0.011 * a.x5
            + 0.729 * self.l6
            - 0.639 * self.l7
    }
}

/// The three model scores for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    pub altman_z: Figure,
    pub zmijewski: Figure,
    pub l_model: Figure,
}

impl ScoreCard {
    pub fn from_record(record: &FinancialRecord) -> Self {
        let altman = AltmanTerms::from_record(record);
        Self {
            altman_z: altman.z_score(),
            zmijewski: ZmijewskiTerms::from_record(record).score(),
            l_model: LModelTerms::from_record(record, altman).score(),
        }
    }
}
