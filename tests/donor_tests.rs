mod common;

use chrono::{Datelike, Local};
use masjid_admin_core::domains::donor::{NewRoutineDonor, UpdateRoutineDonor};
use masjid_admin_core::errors::ServiceError;
use masjid_admin_core::types::{Month, MonthlyAmounts};

fn new_donor(name: &str, year: i32) -> NewRoutineDonor {
    NewRoutineDonor {
        name: name.to_string(),
        address: String::new(),
        year,
        months: MonthlyAmounts::zero(),
        other_amount: 0,
    }
}

#[tokio::test]
async fn create_assigns_sequential_numbers_per_year() {
    let app = common::setup().await;
    let donors = &app.services.donors;

    let a = donors.create_donor(new_donor("Ahmad", 2025)).await.unwrap();
    let b = donors.create_donor(new_donor("Bilal", 2025)).await.unwrap();
    let other_year = donors.create_donor(new_donor("Chand", 2024)).await.unwrap();

    assert_eq!(a.sequence_number, 1);
    assert_eq!(b.sequence_number, 2);
    assert_eq!(other_year.sequence_number, 1);
}

#[tokio::test]
async fn delete_renumbers_the_remaining_rows() {
    let app = common::setup().await;
    let donors = &app.services.donors;

    let mut created = Vec::new();
    for name in ["A", "B", "C", "D", "E"] {
        created.push(donors.create_donor(new_donor(name, 2025)).await.unwrap());
    }

    donors.delete_donor(created[1].id).await.unwrap();

    let remaining = donors.list_donors(2025).await.unwrap();
    let sequences: Vec<i64> = remaining.iter().map(|d| d.sequence_number).collect();
    let names: Vec<&str> = remaining.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);
    assert_eq!(names, vec!["A", "C", "D", "E"]);
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let app = common::setup().await;
    let donors = &app.services.donors;

    let mut months = MonthlyAmounts::zero();
    months.set(Month::March, 500);
    let created = donors
        .create_donor(NewRoutineDonor {
            name: "Ahmad".to_string(),
            address: "Main Road".to_string(),
            year: 2025,
            months,
            other_amount: 100,
        })
        .await
        .unwrap();

    let updated = donors
        .update_donor(
            created.id,
            UpdateRoutineDonor {
                name: Some("Ahmad K.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ahmad K.");
    assert_eq!(updated.address, "Main Road");
    assert_eq!(updated.months.get(Month::March), 500);
    assert_eq!(updated.other_amount, 100);
    assert_eq!(updated.total(), 600);
}

#[tokio::test]
async fn month_grid_update_replaces_all_twelve_columns() {
    let app = common::setup().await;
    let donors = &app.services.donors;

    let mut initial = MonthlyAmounts::zero();
    initial.set(Month::January, 100);
    initial.set(Month::February, 100);
    let created = donors
        .create_donor(NewRoutineDonor {
            months: initial,
            ..new_donor("Ahmad", 2025)
        })
        .await
        .unwrap();

    let mut replacement = MonthlyAmounts::zero();
    replacement.set(Month::December, 250);
    let updated = donors
        .update_donor(
            created.id,
            UpdateRoutineDonor {
                months: Some(replacement),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.months.get(Month::January), 0);
    assert_eq!(updated.months.get(Month::February), 0);
    assert_eq!(updated.months.get(Month::December), 250);
}

#[tokio::test]
async fn get_unknown_donor_is_not_found() {
    let app = common::setup().await;

    let err = app.services.donors.get_donor(999).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)), "got {:?}", err);
}

#[tokio::test]
async fn negative_amounts_are_rejected() {
    let app = common::setup().await;

    let mut months = MonthlyAmounts::zero();
    months.set(Month::June, -5);
    let err = app
        .services
        .donors
        .create_donor(NewRoutineDonor {
            months,
            ..new_donor("Ahmad", 2025)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)), "got {:?}", err);
}

#[tokio::test]
async fn available_years_fall_back_to_the_current_year() {
    let app = common::setup().await;
    let donors = &app.services.donors;

    let years = donors.list_available_years().await.unwrap();
    assert_eq!(years, vec![Local::now().year()]);

    donors.create_donor(new_donor("Ahmad", 2023)).await.unwrap();
    donors.create_donor(new_donor("Bilal", 2025)).await.unwrap();

    let years = donors.list_available_years().await.unwrap();
    assert_eq!(years, vec![2025, 2023]);
}
