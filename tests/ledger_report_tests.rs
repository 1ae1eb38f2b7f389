mod common;

use chrono::NaiveDate;
use masjid_admin_core::domains::ledger::{LedgerKind, NewLedgerEntry, UpdateLedgerEntry};
use masjid_admin_core::types::Month;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn entry(kind: LedgerKind, category: &str, d: NaiveDate, amount: i64) -> NewLedgerEntry {
    NewLedgerEntry {
        kind,
        category: category.to_string(),
        date: d,
        amount,
        note: String::new(),
    }
}

#[tokio::test]
async fn entries_are_listed_by_kind_and_year() {
    let app = common::setup().await;
    let ledger = &app.services.ledger;

    ledger
        .create_entry(entry(LedgerKind::Expense, "Electricity", date(2025, 1, 15), 900))
        .await
        .unwrap();
    ledger
        .create_entry(entry(LedgerKind::Income, "Rent", date(2025, 1, 20), 5000))
        .await
        .unwrap();
    ledger
        .create_entry(entry(LedgerKind::Expense, "Electricity", date(2024, 7, 1), 800))
        .await
        .unwrap();

    let expenses = ledger.list_entries(LedgerKind::Expense, 2025).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 900);

    let income = ledger.list_entries(LedgerKind::Income, 2025).await.unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].category, "Rent");
}

#[tokio::test]
async fn updating_the_date_moves_the_entry_between_years() {
    let app = common::setup().await;
    let ledger = &app.services.ledger;

    let created = ledger
        .create_entry(entry(LedgerKind::Expense, "Repairs", date(2025, 4, 2), 1200))
        .await
        .unwrap();

    let updated = ledger
        .update_entry(
            created.id,
            UpdateLedgerEntry {
                date: Some(date(2024, 4, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.year, 2024);

    assert!(ledger.list_entries(LedgerKind::Expense, 2025).await.unwrap().is_empty());
    assert_eq!(ledger.list_entries(LedgerKind::Expense, 2024).await.unwrap().len(), 1);
}

#[tokio::test]
async fn report_rows_group_by_category_in_first_entry_order() {
    let app = common::setup().await;

    let entries = [
        ("Electricity", date(2025, 1, 10), 900),
        ("Water", date(2025, 1, 12), 300),
        ("Electricity", date(2025, 2, 10), 950),
        ("Electricity", date(2025, 2, 20), 50),
    ];
    for (category, d, amount) in entries {
        app.services
            .ledger
            .create_entry(entry(LedgerKind::Expense, category, d, amount))
            .await
            .unwrap();
    }

    let report = app.services.reports.build_annual_expense_report(2025).await.unwrap();
    assert_eq!(report.year, 2025);
    assert_eq!(report.kind, LedgerKind::Expense);

    let categories: Vec<&str> = report.rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Electricity", "Water"]);

    let electricity = &report.rows[0];
    assert_eq!(electricity.months.get(Month::January), 900);
    assert_eq!(electricity.months.get(Month::February), 1000);
    assert_eq!(electricity.total, 1900);

    assert_eq!(report.column_totals.get(Month::January), 1200);
    assert_eq!(report.column_totals.get(Month::February), 1000);
    assert_eq!(report.grand_total, 2200);
}

#[tokio::test]
async fn report_excludes_other_kinds_and_years() {
    let app = common::setup().await;
    let ledger = &app.services.ledger;

    ledger
        .create_entry(entry(LedgerKind::Income, "Rent", date(2025, 3, 1), 5000))
        .await
        .unwrap();
    ledger
        .create_entry(entry(LedgerKind::Expense, "Repairs", date(2025, 3, 1), 700))
        .await
        .unwrap();
    ledger
        .create_entry(entry(LedgerKind::Income, "Rent", date(2024, 3, 1), 4500))
        .await
        .unwrap();

    let report = app.services.reports.build_annual_income_report(2025).await.unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].category, "Rent");
    assert_eq!(report.rows[0].total, 5000);
    assert_eq!(report.grand_total, 5000);
}

#[tokio::test]
async fn report_for_an_empty_year_has_no_rows() {
    let app = common::setup().await;

    let report = app.services.reports.build_annual_expense_report(2025).await.unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(report.column_totals.sum(), 0);
    assert_eq!(report.grand_total, 0);
}
