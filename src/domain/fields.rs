//! Raw statement field vocabulary.
//!
//! Column keys are matched exactly (case and diacritics included)
//! against the sheet header. Total assets and total liabilities are
//! derived aggregates and never read from the sheet.

use std::fmt;

/// A balance-sheet or income-statement line item read from the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawField {
    CurrentAssets,
    FixedAssets,
    ShortTermLiabilities,
    LongTermLiabilities,
    Inventories,
    OtherCurrentAssets,
    CashAndEquivalents,
    OperatingProfit,
    NetOperatingProfit,
    GrossTradingProfit,
    NetSales,
    NetIncome,
    TradeReceivables,
    /// Stored as a negative figure in the statement.
    CostOfSales,
    /// Trade payables, also called trade debts.
    TradePayables,
    TotalEquity,
    TangibleFixedAssets,
    IntangibleFixedAssets,
    RetainedEarnings,
    PreTaxIncomeContinuingOps,
    FinancingExpenses,
}

impl RawField {
    /// Number of raw fields the engine reads.
    pub const COUNT: usize = 21;

    /// Every raw field, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CurrentAssets,
        Self::FixedAssets,
        Self::ShortTermLiabilities,
        Self::LongTermLiabilities,
        Self::Inventories,
        Self::OtherCurrentAssets,
        Self::CashAndEquivalents,
        Self::OperatingProfit,
        Self::NetOperatingProfit,
        Self::GrossTradingProfit,
        Self::NetSales,
        Self::NetIncome,
        Self::TradeReceivables,
        Self::CostOfSales,
        Self::TradePayables,
        Self::TotalEquity,
        Self::TangibleFixedAssets,
        Self::IntangibleFixedAssets,
        Self::RetainedEarnings,
        Self::PreTaxIncomeContinuingOps,
        Self::FinancingExpenses,
    ];

    /// Exact column key in the sheet.
    pub const fn key(self) -> &'static str {
        match self {
            Self::CurrentAssets => "Dönen Varlıklar",
            Self::FixedAssets => "Duran Varlıklar",
            Self::ShortTermLiabilities => "Kısa Vadeli Yükümlülükler",
            Self::LongTermLiabilities => "Uzun Vadeli Yükümlülükler",
            Self::Inventories => "Stoklar",
            Self::OtherCurrentAssets => "Diğer Dönen Varlıklar",
            Self::CashAndEquivalents => "Nakit ve Nakit Benzerleri",
            Self::OperatingProfit => "FAALİYET KARI (ZARARI)",
            Self::NetOperatingProfit => "Net Faaliyet Kar/Zararı",
            Self::GrossTradingProfit => "Ticari Faaliyetlerden Brüt Kar (Zarar)",
            Self::NetSales => "Satış Gelirleri",
            Self::NetIncome => "Dönem Net Kar/Zararı",
            Self::TradeReceivables => "Ticari Alacaklar",
            Self::CostOfSales => "Satışların Maliyeti (-)",
            Self::TradePayables => "Ticari Borçlar",
            Self::TotalEquity => "Toplam Özkaynaklar",
            Self::TangibleFixedAssets => "Maddi Duran Varlıklar",
            Self::IntangibleFixedAssets => "Maddi Olmayan Duran Varlıklar",
            Self::RetainedEarnings => "Geçmiş Yıllar Kar/Zararları",
            Self::PreTaxIncomeContinuingOps => {
                "SÜRDÜRÜLEN FAALİYETLER VERGİ ÖNCESİ KARI (ZARARI)"
            }
            Self::FinancingExpenses => "Finansman Giderleri",
        }
    }

    /// Position in `ALL`, used to index per-row storage.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
