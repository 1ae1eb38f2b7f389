mod common;

use chrono::NaiveDate;
use masjid_admin_core::domains::charity_box::{NewExternalCharityBox, NewMosqueCharityBox};
use masjid_admin_core::domains::donor::NewRoutineDonor;
use masjid_admin_core::domains::integration::{
    EditTarget, SourceRef, CHARITY_BOX_PREFIX, MOSQUE_BOX_LABEL, SPECIAL_DONATION_PREFIX,
};
use masjid_admin_core::domains::special_donation::NewSpecialDonation;
use masjid_admin_core::errors::ServiceError;
use masjid_admin_core::types::{Month, MonthlyAmounts};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn months_with(month: Month, amount: i64) -> MonthlyAmounts {
    let mut months = MonthlyAmounts::zero();
    months.set(month, amount);
    months
}

async fn seed_all_sources(app: &common::TestApp) {
    app.services
        .donors
        .create_donor(NewRoutineDonor {
            name: "Ahmad".to_string(),
            address: "Main Road".to_string(),
            year: 2025,
            months: months_with(Month::January, 500),
            other_amount: 50,
        })
        .await
        .unwrap();

    app.services
        .charity_boxes
        .create_external_box(NewExternalCharityBox {
            label: "North Gate".to_string(),
            location: "Market".to_string(),
            year: 2025,
            months: months_with(Month::February, 300),
        })
        .await
        .unwrap();

    for (d, amount) in [(date(2025, 3, 5), 120), (date(2025, 9, 18), 80)] {
        app.services
            .charity_boxes
            .create_mosque_box(NewMosqueCharityBox { date: d, amount })
            .await
            .unwrap();
    }

    for (d, amount) in [(date(2025, 4, 1), 1000), (date(2025, 6, 15), 400)] {
        app.services
            .special_donations
            .create_donation(NewSpecialDonation {
                donor_name: "Hamid".to_string(),
                date: d,
                amount,
                note: "Ramadan".to_string(),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn merged_view_emits_all_sources_in_order() {
    let app = common::setup().await;
    seed_all_sources(&app).await;

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();
    assert_eq!(records.len(), 4);

    let names: Vec<String> = records.iter().map(|r| r.display_name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "Ahmad".to_string(),
            format!("{}North Gate", CHARITY_BOX_PREFIX),
            MOSQUE_BOX_LABEL.to_string(),
            format!("{}Hamid", SPECIAL_DONATION_PREFIX),
        ]
    );

    // Row numbering restarts at 1 on every merge.
    assert_eq!(
        records.iter().map(|r| r.sequence_number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[tokio::test]
async fn merged_rows_carry_recomputed_totals() {
    let app = common::setup().await;
    seed_all_sources(&app).await;

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();

    assert_eq!(records[0].total, 550);
    assert_eq!(records[0].other_amount, 50);

    assert_eq!(records[1].total, 300);
    assert_eq!(records[1].display_address, "Market");

    // The mosque row buckets its collections by month.
    assert_eq!(records[2].months.get(Month::March), 120);
    assert_eq!(records[2].months.get(Month::September), 80);
    assert_eq!(records[2].total, 200);

    // The special donation group does the same and lists its members.
    assert_eq!(records[3].months.get(Month::April), 1000);
    assert_eq!(records[3].months.get(Month::June), 400);
    assert_eq!(records[3].total, 1400);
    match &records[3].source {
        SourceRef::SpecialDonationGroup {
            donor_name,
            note,
            member_ids,
        } => {
            assert_eq!(donor_name, "Hamid");
            assert_eq!(note, "Ramadan");
            assert_eq!(member_ids.len(), 2);
        }
        other => panic!("unexpected source {:?}", other),
    }
}

#[tokio::test]
async fn special_donations_group_by_name_and_note() {
    let app = common::setup().await;
    let donations = &app.services.special_donations;

    for (name, note, d, amount) in [
        ("Hamid", "Ramadan", date(2025, 4, 1), 100),
        ("Hamid", "Eid", date(2025, 5, 1), 200),
        ("Hamid", "Ramadan", date(2025, 4, 20), 300),
    ] {
        donations
            .create_donation(NewSpecialDonation {
                donor_name: name.to_string(),
                date: d,
                amount,
                note: note.to_string(),
            })
            .await
            .unwrap();
    }

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].display_address, "Ramadan");
    assert_eq!(records[0].total, 400);
    assert_eq!(records[1].display_address, "Eid");
    assert_eq!(records[1].total, 200);
}

#[tokio::test]
async fn mosque_aggregate_only_appears_when_the_year_has_collections() {
    let app = common::setup().await;

    app.services
        .charity_boxes
        .create_mosque_box(NewMosqueCharityBox {
            date: date(2024, 12, 31),
            amount: 75,
        })
        .await
        .unwrap();

    assert!(app.services.integration.yearly_ledger(2025).await.unwrap().is_empty());

    let in_2024 = app.services.integration.yearly_ledger(2024).await.unwrap();
    assert_eq!(in_2024.len(), 1);
    assert_eq!(in_2024[0].display_name, MOSQUE_BOX_LABEL);
    assert_eq!(in_2024[0].months.get(Month::December), 75);
}

#[tokio::test]
async fn delete_routes_to_the_originating_collection() {
    let app = common::setup().await;
    seed_all_sources(&app).await;

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();

    // Deleting the donor row removes the underlying donor.
    app.services.integration.delete_record(&records[0]).await.unwrap();
    assert!(app.services.donors.list_donors(2025).await.unwrap().is_empty());

    // Deleting the group row removes every member.
    let group_row = records
        .iter()
        .find(|r| matches!(r.source, SourceRef::SpecialDonationGroup { .. }))
        .unwrap();
    app.services.integration.delete_record(group_row).await.unwrap();
    assert!(app
        .services
        .special_donations
        .list_donations(2025)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn the_mosque_aggregate_row_is_not_editable() {
    let app = common::setup().await;
    seed_all_sources(&app).await;

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();
    let mosque_row = records
        .iter()
        .find(|r| r.display_name == MOSQUE_BOX_LABEL)
        .unwrap();

    assert_eq!(
        app.services.integration.resolve_edit_target(mosque_row),
        EditTarget::NotEditable
    );

    let err = app.services.integration.delete_record(mosque_row).await.unwrap_err();
    assert!(matches!(err, ServiceError::Ui(_)), "got {:?}", err);

    // Nothing behind the aggregate was touched.
    assert_eq!(app.services.charity_boxes.list_mosque_boxes(2025).await.unwrap().len(), 2);
}

#[tokio::test]
async fn stale_group_rows_abort_before_deleting_anything() {
    let app = common::setup().await;
    seed_all_sources(&app).await;

    let records = app.services.integration.yearly_ledger(2025).await.unwrap();
    let group_row = records
        .iter()
        .find(|r| matches!(r.source, SourceRef::SpecialDonationGroup { .. }))
        .unwrap();

    // One member disappears between the merge and the delete.
    let member_ids = match &group_row.source {
        SourceRef::SpecialDonationGroup { member_ids, .. } => member_ids.clone(),
        other => panic!("unexpected source {:?}", other),
    };
    app.services
        .special_donations
        .delete_donation(member_ids[0])
        .await
        .unwrap();

    let err = app.services.integration.delete_record(group_row).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)), "got {:?}", err);

    // The surviving member is still there.
    assert_eq!(
        app.services.special_donations.list_donations(2025).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn rows_with_unparseable_stored_dates_drop_out_of_the_merged_view() {
    let app = common::setup().await;

    app.services
        .donors
        .create_donor(NewRoutineDonor {
            name: "Ahmad".to_string(),
            address: String::new(),
            year: 2025,
            months: months_with(Month::January, 500),
            other_amount: 0,
        })
        .await
        .unwrap();

    // Corrupt date text can only arrive out of band, so write it past
    // the repositories. Both dates sort inside the year's text range
    // but are not real calendar dates, so they survive the SQL filter
    // and fail the parse.
    sqlx::query(
        "INSERT INTO special_donations (sequence_number, donor_name, date, amount, note, year) \
         VALUES (1, 'Broken', '2025-02-30', 500, '', 2025)",
    )
    .execute(&app.pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO mosque_charity_boxes (date, amount, year) \
         VALUES ('2025-04-31', 700, 2025)",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    // The merged view still resolves; the broken rows contribute
    // nothing and the mosque aggregate never materialises.
    let records = app.services.integration.yearly_ledger(2025).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].display_name, "Ahmad");
    assert_eq!(records[0].total, 500);
}

#[tokio::test]
async fn available_years_union_all_four_sources() {
    let app = common::setup().await;

    app.services
        .donors
        .create_donor(NewRoutineDonor {
            name: "Ahmad".to_string(),
            address: String::new(),
            year: 2023,
            months: MonthlyAmounts::zero(),
            other_amount: 0,
        })
        .await
        .unwrap();
    app.services
        .special_donations
        .create_donation(NewSpecialDonation {
            donor_name: "Hamid".to_string(),
            date: date(2025, 1, 1),
            amount: 10,
            note: String::new(),
        })
        .await
        .unwrap();

    let years = app.services.integration.list_available_years().await.unwrap();
    assert_eq!(years, vec![2025, 2023]);
}
