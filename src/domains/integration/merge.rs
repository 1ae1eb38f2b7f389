use crate::domains::charity_box::types::{ExternalCharityBox, MosqueCharityBox};
use crate::domains::donor::types::RoutineDonor;
use crate::domains::integration::aggregate::bucket_by_month;
use crate::domains::integration::types::{
    IntegratedRecord, SourceRef, CHARITY_BOX_PREFIX, MOSQUE_BOX_LABEL, SPECIAL_DONATION_PREFIX,
};
use crate::domains::special_donation::types::SpecialDonation;
use crate::types::{Month, MonthlyAmounts};
use chrono::Datelike;
use std::collections::HashMap;

/// Merge the four income sources into the unified yearly ledger view.
///
/// Donor and external box inputs are already scoped to the year by the
/// caller and are emitted one-to-one. Dated sources are filtered by the
/// year of their transaction date: mosque box collections collapse into
/// one synthetic aggregate row, special donations group by (donor name,
/// note) in first-seen order with every member id retained. Emission
/// order is donors, external boxes, the mosque aggregate, then donation
/// groups; ids and sequence numbers are reassigned 1..N over that order
/// on every call.
pub fn integrate(
    donors: &[RoutineDonor],
    external_boxes: &[ExternalCharityBox],
    special_donations: &[SpecialDonation],
    mosque_boxes: &[MosqueCharityBox],
    year: i32,
) -> Vec<IntegratedRecord> {
    let mut records = Vec::with_capacity(donors.len() + external_boxes.len() + 2);

    for donor in donors {
        records.push(IntegratedRecord {
            id: 0,
            sequence_number: 0,
            display_name: donor.name.clone(),
            display_address: donor.address.clone(),
            months: donor.months,
            other_amount: donor.other_amount,
            total: donor.months.sum() + donor.other_amount,
            source: SourceRef::Donor(donor.id),
        });
    }

    for external_box in external_boxes {
        records.push(IntegratedRecord {
            id: 0,
            sequence_number: 0,
            display_name: format!("{}{}", CHARITY_BOX_PREFIX, external_box.label),
            display_address: external_box.location.clone(),
            months: external_box.months,
            other_amount: 0,
            total: external_box.months.sum(),
            source: SourceRef::ExternalBox(external_box.id),
        });
    }

    let mosque_totals = bucket_by_month(
        mosque_boxes.iter().map(|b| (b.date, b.amount)),
        year,
    );
    let mosque_matched = mosque_boxes.iter().any(|b| b.date.year() == year);
    if mosque_matched {
        records.push(IntegratedRecord {
            id: 0,
            sequence_number: 0,
            display_name: MOSQUE_BOX_LABEL.to_string(),
            display_address: String::new(),
            months: mosque_totals.months,
            other_amount: 0,
            total: mosque_totals.total,
            source: SourceRef::MosqueBoxAggregate { year },
        });
    }

    records.extend(group_special_donations(special_donations, year));

    for (index, record) in records.iter_mut().enumerate() {
        record.id = index as i64 + 1;
        record.sequence_number = index as i64 + 1;
    }

    records
}

struct DonationGroup {
    donor_name: String,
    note: String,
    months: MonthlyAmounts,
    member_ids: Vec<i64>,
}

/// Group a year's special donations by (donor name, note), bucketing
/// each member's amount into its date's month. Group order is the
/// first appearance of the key in input order.
fn group_special_donations(donations: &[SpecialDonation], year: i32) -> Vec<IntegratedRecord> {
    let mut order: Vec<DonationGroup> = Vec::new();
    let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();

    for donation in donations {
        if donation.date.year() != year {
            continue;
        }
        let key = (donation.donor_name.clone(), donation.note.clone());
        let index = *index_by_key.entry(key).or_insert_with(|| {
            order.push(DonationGroup {
                donor_name: donation.donor_name.clone(),
                note: donation.note.clone(),
                months: MonthlyAmounts::zero(),
                member_ids: Vec::new(),
            });
            order.len() - 1
        });
        let group = &mut order[index];
        group.months.add(Month::from_date(donation.date), donation.amount);
        group.member_ids.push(donation.id);
    }

    order
        .into_iter()
        .map(|group| IntegratedRecord {
            id: 0,
            sequence_number: 0,
            display_name: format!("{}{}", SPECIAL_DONATION_PREFIX, group.donor_name),
            display_address: group.note.clone(),
            months: group.months,
            other_amount: 0,
            total: group.months.sum(),
            source: SourceRef::SpecialDonationGroup {
                donor_name: group.donor_name,
                note: group.note,
                member_ids: group.member_ids,
            },
        })
        .collect()
}
