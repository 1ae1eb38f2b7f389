use crate::domains::ledger::repository::LedgerRepository;
use crate::domains::ledger::types::LedgerKind;
use crate::domains::report::types::{AnnualReport, ReportRow};
use crate::errors::{DomainError, ServiceResult};
use crate::types::{Month, MonthlyAmounts};
use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;
use std::sync::Arc;

/// Trait defining annual reconciliation report operations
#[async_trait]
pub trait ReportService: Send + Sync {
    async fn build_annual_income_report(&self, year: i32) -> ServiceResult<AnnualReport>;

    async fn build_annual_expense_report(&self, year: i32) -> ServiceResult<AnnualReport>;
}

/// Implementation of the annual reconciliation report.
///
/// One bounded-date-range sum per category-month cell; the windows are
/// independent, so all cells of the year are issued concurrently and
/// reduced afterwards.
#[derive(Clone)]
pub struct ReportServiceImpl {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl ReportServiceImpl {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }

    async fn build_report(&self, kind: LedgerKind, year: i32) -> ServiceResult<AnnualReport> {
        let categories = self.ledger_repo.distinct_categories(kind, year).await?;
        debug!(
            "Building {} report for {}: {} categories",
            kind,
            year,
            categories.len()
        );

        let mut cells = Vec::with_capacity(categories.len() * 12);
        for category in &categories {
            for month in Month::ALL {
                let start = month.first_day(year).ok_or_else(|| {
                    DomainError::Internal(format!("Invalid report year {}", year))
                })?;
                let end = month.last_day(year).ok_or_else(|| {
                    DomainError::Internal(format!("Invalid report year {}", year))
                })?;
                cells.push(self.ledger_repo.sum_in_range(kind, category, start, end));
            }
        }
        let sums = try_join_all(cells).await?;

        let mut rows = Vec::with_capacity(categories.len());
        let mut column_totals = MonthlyAmounts::zero();
        for (row_index, category) in categories.into_iter().enumerate() {
            let mut months = MonthlyAmounts::zero();
            for (month_index, month) in Month::ALL.into_iter().enumerate() {
                let amount = sums[row_index * 12 + month_index];
                months.set(month, amount);
                column_totals.add(month, amount);
            }
            rows.push(ReportRow {
                category,
                total: months.sum(),
                months,
            });
        }

        Ok(AnnualReport {
            year,
            kind,
            rows,
            grand_total: column_totals.sum(),
            column_totals,
        })
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn build_annual_income_report(&self, year: i32) -> ServiceResult<AnnualReport> {
        self.build_report(LedgerKind::Income, year).await
    }

    async fn build_annual_expense_report(&self, year: i32) -> ServiceResult<AnnualReport> {
        self.build_report(LedgerKind::Expense, year).await
    }
}
