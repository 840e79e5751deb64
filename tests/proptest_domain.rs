//! Property-Based Tests - Ratio Engine Invariants
//!
//! Uses `proptest` to verify that the null-safe division primitive and
//! the ratio engine hold their invariants across random statements.

use proptest::prelude::*;

use audit_opinion_predictor::domain::features::{Feature, FeatureSelection};
use audit_opinion_predictor::domain::fields::RawField;
use audit_opinion_predictor::domain::figure::{Figure, safe_div};
use audit_opinion_predictor::domain::ratios::{RatioSet, compute_ratios};
use audit_opinion_predictor::domain::statement::{FinancialRecord, RawTable};
use audit_opinion_predictor::domain::AnalysisError;

fn record_from(values: &[f64]) -> FinancialRecord {
    RawField::ALL
        .iter()
        .zip(values)
        .fold(FinancialRecord::empty(), |r, (f, v)| r.with(*f, *v))
}

fn complete_record() -> impl Strategy<Value = FinancialRecord> {
    prop::collection::vec(-1.0e6f64..1.0e6, RawField::COUNT).prop_map(|v| record_from(&v))
}

fn header() -> Vec<String> {
    RawField::ALL.iter().map(|f| f.key().to_string()).collect()
}

// ── Null-Safe Division ──────────────────────────────────────

proptest! {
    /// Zero and null denominators always give exactly 0.
    #[test]
    fn safe_div_zero_or_null_denominator_is_zero(n in -1.0e9f64..1.0e9) {
        prop_assert_eq!(safe_div(Figure::new(n), Figure::new(0.0)), Figure::ZERO);
        prop_assert_eq!(safe_div(Figure::new(n), Figure::new(-0.0)), Figure::ZERO);
        prop_assert_eq!(safe_div(Figure::new(n), Figure::NULL), Figure::ZERO);
        prop_assert_eq!(safe_div(Figure::NULL, Figure::new(0.0)), Figure::ZERO);
    }

    /// A usable denominator gives plain division.
    #[test]
    fn safe_div_matches_division(n in -1.0e6f64..1.0e6, d in 1.0e-3f64..1.0e6, neg in any::<bool>()) {
        let d = if neg { -d } else { d };
        prop_assert_eq!(safe_div(Figure::new(n), Figure::new(d)), Figure::new(n / d));
    }
}

// ── Ratio Engine ────────────────────────────────────────────

proptest! {
    /// Complete records give 32 finite ratios.
    #[test]
    fn complete_record_gives_finite_ratios(record in complete_record()) {
        let set = RatioSet::compute(&record);
        for (feature, value) in set.iter() {
            let v = value.value();
            prop_assert!(v.is_some(), "{feature} is null");
            prop_assert!(v.is_some_and(f64::is_finite), "{feature} is not finite: {v:?}");
        }
    }

    /// Whatever the magnitudes, no division yields NaN and the values
    /// handed to the classifier are finite.
    #[test]
    fn extreme_records_never_feed_non_finite_values(
        values in prop::collection::vec(
            prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL,
            RawField::COUNT,
        )
    ) {
        let record = record_from(&values);
        prop_assert!(!safe_div(record.total_assets(), record.total_liabilities()).value().is_some_and(f64::is_nan));
        let set = RatioSet::compute(&record);
        if let Some(features) = set.feature_values() {
            prop_assert!(features.iter().all(|v| v.is_finite()));
        }
        prop_assert_eq!(set.is_complete(), set.feature_values().is_some());
    }

    /// The engine is a pure function of the record.
    #[test]
    fn ratio_engine_idempotent(record in complete_record()) {
        prop_assert_eq!(RatioSet::compute(&record), RatioSet::compute(&record));
    }

    /// Cost of sales is negative, so both turnovers come out positive.
    #[test]
    fn cost_of_sales_sign_flip(
        record in complete_record(),
        cost in 1.0f64..1.0e6,
        payables in 1.0f64..1.0e6,
        inventories in 1.0f64..1.0e6,
    ) {
        let record = record
            .with(RawField::CostOfSales, -cost)
            .with(RawField::TradePayables, payables)
            .with(RawField::Inventories, inventories);
        let set = RatioSet::compute(&record);
        let payables_turnover = set.get(Feature::PayablesTurnover).value().unwrap_or(-1.0);
        let inventory_turnover = set.get(Feature::InventoryTurnover).value().unwrap_or(-1.0);
        prop_assert!(payables_turnover > 0.0);
        prop_assert!(inventory_turnover > 0.0);
        prop_assert!((payables_turnover - cost / payables).abs() <= 1e-9 * payables_turnover.max(1.0));
    }

    /// Zero short-term liabilities zero every ratio divided by them.
    #[test]
    fn zero_short_term_liabilities(record in complete_record()) {
        let set = RatioSet::compute(&record.with(RawField::ShortTermLiabilities, 0.0));
        for feature in [
            Feature::CurrentRatio,
            Feature::AcidTestRatio,
            Feature::CashRatio,
            Feature::EbitdaProxyToShortTermDebt,
            Feature::NetSalesToShortTermDebt,
            Feature::CoreOperatingProfitToShortTermDebt,
        ] {
            prop_assert_eq!(set.get(feature), Figure::ZERO, "{}", feature);
        }
    }
}

// ── Row Filtering ───────────────────────────────────────────

proptest! {
    /// Rows are dropped iff one of their ratios is null, order preserved.
    #[test]
    fn rows_dropped_iff_incomplete(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::weighted(0.9, -1.0e3f64..1.0e3), RawField::COUNT),
            1..12,
        )
    ) {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()).collect())
            .collect();
        let table = RawTable::new(header(), cells);
        let enriched = compute_ratios(&table).unwrap();
        let complete: Vec<usize> = enriched
            .ratios()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_complete())
            .map(|(i, _)| i)
            .collect();

        match FeatureSelection::from_enriched(&enriched) {
            Ok(selection) => {
                let kept: Vec<usize> = selection.rows().iter().map(|r| r.row_index).collect();
                prop_assert_eq!(&kept, &complete);
                prop_assert!(selection.len() <= table.len());
                prop_assert_eq!(selection.skipped_rows(), table.len() - kept.len());
            }
            Err(err) => {
                prop_assert!(complete.is_empty());
                prop_assert_eq!(err, AnalysisError::NoAnalyzableRows { total_rows: table.len() });
            }
        }
    }
}
