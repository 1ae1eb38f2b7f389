mod common;

use chrono::NaiveDate;
use masjid_admin_core::domains::special_donation::{NewSpecialDonation, UpdateSpecialDonation};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn new_donation(name: &str, d: NaiveDate, amount: i64) -> NewSpecialDonation {
    NewSpecialDonation {
        donor_name: name.to_string(),
        date: d,
        amount,
        note: String::new(),
    }
}

#[tokio::test]
async fn sequence_numbers_are_scoped_per_year() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    let a = donations
        .create_donation(new_donation("Hamid", date(2025, 2, 1), 100))
        .await
        .unwrap();
    let b = donations
        .create_donation(new_donation("Imran", date(2025, 5, 9), 200))
        .await
        .unwrap();
    let c = donations
        .create_donation(new_donation("Javed", date(2024, 8, 20), 300))
        .await
        .unwrap();

    assert_eq!(a.sequence_number, 1);
    assert_eq!(b.sequence_number, 2);
    assert_eq!(c.sequence_number, 1);
}

#[tokio::test]
async fn year_and_listing_follow_the_date() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    let created = donations
        .create_donation(new_donation("Hamid", date(2025, 12, 31), 100))
        .await
        .unwrap();
    assert_eq!(created.year, 2025);

    let in_2025 = donations.list_donations(2025).await.unwrap();
    assert_eq!(in_2025.len(), 1);
    assert!(donations.list_donations(2024).await.unwrap().is_empty());
}

#[tokio::test]
async fn moving_the_date_across_years_resequences_both_years() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    let first = donations
        .create_donation(new_donation("Hamid", date(2025, 1, 10), 100))
        .await
        .unwrap();
    let second = donations
        .create_donation(new_donation("Imran", date(2025, 3, 10), 200))
        .await
        .unwrap();

    let moved = donations
        .update_donation(
            first.id,
            UpdateSpecialDonation {
                date: Some(date(2024, 11, 5)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.year, 2024);
    assert_eq!(moved.sequence_number, 1);

    // The year it left closes the gap.
    let remaining = donations.list_donations(2025).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert_eq!(remaining[0].sequence_number, 1);
}

#[tokio::test]
async fn a_donation_with_an_unparseable_stored_date_is_skipped_on_listing() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    let kept = donations
        .create_donation(new_donation("Hamid", date(2025, 6, 1), 100))
        .await
        .unwrap();

    // Written past the repository: the date sorts inside the year's
    // text range but is not a real calendar date.
    sqlx::query(
        "INSERT INTO special_donations (sequence_number, donor_name, date, amount, note, year) \
         VALUES (2, 'Broken', '2025-06-31', 500, '', 2025)",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let listed = donations.list_donations(2025).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
}

#[tokio::test]
async fn delete_renumbers_within_the_year() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    let mut ids = Vec::new();
    for (name, day) in [("A", 1), ("B", 2), ("C", 3)] {
        let created = donations
            .create_donation(new_donation(name, date(2025, 6, day), 50))
            .await
            .unwrap();
        ids.push(created.id);
    }

    donations.delete_donation(ids[0]).await.unwrap();

    let remaining = donations.list_donations(2025).await.unwrap();
    assert_eq!(
        remaining.iter().map(|d| d.sequence_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(
        remaining.iter().map(|d| d.donor_name.as_str()).collect::<Vec<_>>(),
        vec!["B", "C"]
    );
}
