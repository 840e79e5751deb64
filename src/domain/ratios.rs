//! Ratio Engine - 32 Financial Ratios per Statement Row
//!
//! Pure transformation from a raw statement table to an enriched table
//! that pairs every raw row with its derived ratio set. The raw table is
//! borrowed, never modified.
//!
//! Derivation groups:
//! - Liquidity
//! - Profitability margins (×100 unless noted)
//! - Turnover (cost of sales is stored negative, hence the sign flips)
//! - Capital structure
//! - Short-term debt focus
//! - Misc. profitability
//! - Scoring models (see `scoring`)
//!
//! Every ratio goes through `safe_div`: a zero or null denominator gives 0.

use super::error::AnalysisError;
use super::features::Feature;
use super::fields::RawField;
use super::figure::{Figure, safe_div};
use super::scoring::ScoreCard;
use super::statement::{FieldIndex, FinancialRecord, RawTable};

/// The 32 derived ratios of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSet {
    values: [Figure; Feature::COUNT],
}

impl RatioSet {
    /// Derive every ratio from a single record.
    pub fn compute(record: &FinancialRecord) -> Self {
        use Feature as R;
        use RawField as F;

        let current_assets = record.get(F::CurrentAssets);
        let fixed_assets = record.get(F::FixedAssets);
        let stl = record.get(F::ShortTermLiabilities);
        let inventories = record.get(F::Inventories);
        let cash = record.get(F::CashAndEquivalents);
        let operating_profit = record.get(F::OperatingProfit);
        let net_operating_profit = record.get(F::NetOperatingProfit);
        let net_sales = record.get(F::NetSales);
        let net_income = record.get(F::NetIncome);
        let cost_of_sales = record.get(F::CostOfSales);
        let equity = record.get(F::TotalEquity);

        let total_assets = record.total_assets();
        let total_liabilities = record.total_liabilities();

        let mut set = Self {
            values: [Figure::NULL; Feature::COUNT],
        };

        // ── Liquidity ───────────────────────────────────────
        set.put(R::CurrentRatio, safe_div(current_assets, stl));
        set.put(
            R::AcidTestRatio,
            safe_div(
                current_assets - inventories - record.get(F::OtherCurrentAssets),
                stl,
            ),
        );
        set.put(R::CashRatio, safe_div(cash, stl));

        // ── Profitability margins ───────────────────────────
        set.put(R::OperatingProfitMargin, safe_div(operating_profit * 100.0, net_sales));
        set.put(R::CoreOperatingMargin, safe_div(net_operating_profit * 100.0, net_sales));
        set.put(
            R::GrossMargin,
            safe_div(record.get(F::GrossTradingProfit) * 100.0, net_sales),
        );
        set.put(R::NetMargin, safe_div(net_income * 100.0, net_sales));
        set.put(R::EbitdaProxyToShortTermDebt, safe_div(operating_profit, stl));

        // ── Turnover ────────────────────────────────────────
        set.put(R::AssetTurnover, safe_div(net_sales, total_assets));
        set.put(
            R::ReceivablesTurnover,
            safe_div(net_sales, record.get(F::TradeReceivables)),
        );
        set.put(R::CurrentAssetsTurnover, safe_div(current_assets, net_sales));
        set.put(
            R::PayablesTurnover,
            -safe_div(cost_of_sales, record.get(F::TradePayables)),
        );
        set.put(R::InventoryTurnover, -safe_div(cost_of_sales, inventories));

        // ── Capital structure ───────────────────────────────
        set.put(R::DebtToEquity, safe_div(total_liabilities, equity) * 100.0);
        set.put(R::FinancialLeverage, safe_div(total_liabilities, total_assets) * 100.0);
        set.put(R::EquityToAssets, safe_div(equity, total_assets));
        set.put(
            R::EquityToTangibleFixedAssets,
            safe_div(equity, record.get(F::TangibleFixedAssets)),
        );
        set.put(
            R::FixedAssetsToTangibleEquity,
            safe_div(fixed_assets, equity - record.get(F::IntangibleFixedAssets)),
        );
        set.put(R::FixedAssetsToAssets, safe_div(fixed_assets * 100.0, total_assets));
        set.put(R::CurrentAssetsToAssets, safe_div(current_assets * 100.0, total_assets));

        // ── Short-term debt focus ───────────────────────────
        set.put(R::ShortTermDebtToAssets, safe_div(stl, total_assets));
        set.put(R::ShortTermDebtToCurrentAssets, safe_div(stl, current_assets));
        set.put(R::ShortTermDebtToEquity, safe_div(stl, equity));
        set.put(R::ShortTermDebtToTotalDebt, safe_div(stl, total_liabilities));
        set.put(R::NetSalesToShortTermDebt, safe_div(net_sales, stl));
        set.put(
            R::CoreOperatingProfitToShortTermDebt,
            safe_div(net_operating_profit, stl),
        );

        // ── Misc. profitability ─────────────────────────────
        set.put(R::ReturnOnAssets, safe_div(net_income * 100.0, total_assets));
        set.put(R::RoceProxy, safe_div(operating_profit * 100.0, total_assets));
        set.put(
            R::FinancingExpenseToNetSales,
            safe_div(record.get(F::FinancingExpenses), net_sales),
        );

        // ── Scoring models ──────────────────────────────────
        let scores = ScoreCard::from_record(record);
        set.put(R::AltmanZ, scores.altman_z);
        set.put(R::Zmijewski, scores.zmijewski);
        set.put(R::LModel, scores.l_model);

        set
    }

    fn put(&mut self, feature: Feature, value: Figure) {
        self.values[feature.index()] = value;
    }

    /// Value of one ratio.
    pub const fn get(&self, feature: Feature) -> Figure {
        self.values[feature.index()]
    }

    /// Whether every ratio is present and finite.
    pub fn is_complete(&self) -> bool {
        self.feature_values().is_some()
    }

    /// All 32 values in `Feature::ALL` order, or `None` if any is null
    /// or not finite (overflowed statement values).
    pub fn feature_values(&self) -> Option<[f64; Feature::COUNT]> {
        let mut out = [0.0; Feature::COUNT];
        for (slot, value) in out.iter_mut().zip(&self.values) {
            *slot = value.value().filter(|v| v.is_finite())?;
        }
        Some(out)
    }

    /// `(feature, value)` pairs in `Feature::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, Figure)> + '_ {
        Feature::ALL.iter().map(|f| (*f, self.get(*f)))
    }
}

/// Raw table paired with the ratio set of every row, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTable<'a> {
    raw: &'a RawTable,
    ratios: Vec<RatioSet>,
}

impl<'a> EnrichedTable<'a> {
    /// The raw table the ratios were derived from.
    pub const fn raw(&self) -> &'a RawTable {
        self.raw
    }

    /// Ratio sets, index-aligned with `raw().rows()`.
    pub fn ratios(&self) -> &[RatioSet] {
        &self.ratios
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

/// Run the ratio engine over a whole table.
///
/// # Errors
/// `MissingFields` if any required column is absent; nothing is computed
/// in that case.
pub fn compute_ratios(table: &RawTable) -> Result<EnrichedTable<'_>, AnalysisError> {
    let index = FieldIndex::resolve(table)?;
    let ratios = table
        .rows()
        .iter()
        .map(|row| RatioSet::compute(&FinancialRecord::from_row(row, &index)))
        .collect();
    Ok(EnrichedTable { raw: table, ratios })
}
