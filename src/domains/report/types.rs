use crate::domains::ledger::types::LedgerKind;
use crate::types::MonthlyAmounts;
use serde::{Deserialize, Serialize};

/// One category's line of the annual reconciliation report: the
/// twelve-month breakdown and the row total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub category: String,
    pub months: MonthlyAmounts,
    pub total: i64,
}

/// Annual reconciliation report for one ledger kind: a row per distinct
/// category plus the column totals across all rows. Empty when the year
/// has no entries of the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualReport {
    pub year: i32,
    pub kind: LedgerKind,
    pub rows: Vec<ReportRow>,
    pub column_totals: MonthlyAmounts,
    pub grand_total: i64,
}
