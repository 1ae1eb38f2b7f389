use crate::types::MonthlyAmounts;
use serde::{Deserialize, Serialize};

/// Display-name prefix for external charity box rows in the merged view.
pub const CHARITY_BOX_PREFIX: &str = "Charity Box: ";
/// Display-name prefix for special donation rows in the merged view.
pub const SPECIAL_DONATION_PREFIX: &str = "Special Donation: ";
/// Display name of the synthetic in-mosque charity box row.
pub const MOSQUE_BOX_LABEL: &str = "Mosque Charity Box";

/// Back-reference from a merged row to its originating collection.
///
/// Mutations on the merged view are routed by matching on this tag
/// rather than by guessing at ids. A special donation row keeps the
/// full member-id list of its group, so a group spanning several
/// underlying records remains individually addressable. The mosque
/// box row is a pre-summed aggregate of every collection in the year
/// and carries no single record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceRef {
    Donor(i64),
    ExternalBox(i64),
    SpecialDonationGroup {
        donor_name: String,
        note: String,
        member_ids: Vec<i64>,
    },
    MosqueBoxAggregate {
        year: i32,
    },
}

impl SourceRef {
    /// Resolve the mutation target for a merged row.
    pub fn edit_target(&self) -> EditTarget {
        match self {
            SourceRef::Donor(id) => EditTarget::Donor(*id),
            SourceRef::ExternalBox(id) => EditTarget::ExternalBox(*id),
            SourceRef::SpecialDonationGroup { member_ids, .. } => {
                EditTarget::SpecialDonations(member_ids.clone())
            }
            SourceRef::MosqueBoxAggregate { .. } => EditTarget::NotEditable,
        }
    }
}

/// Where an edit or delete on a merged row lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditTarget {
    Donor(i64),
    ExternalBox(i64),
    SpecialDonations(Vec<i64>),
    /// The synthetic mosque box aggregate; the UI must disable or
    /// special-case this row.
    NotEditable,
}

/// One row of the unified yearly ledger view.
///
/// Ephemeral: recomputed in full on every merge. `id` and
/// `sequence_number` are reassigned 1..N in emission order and are not
/// stable across refreshes; `total` is always recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedRecord {
    pub id: i64,
    pub sequence_number: i64,
    pub display_name: String,
    pub display_address: String,
    pub months: MonthlyAmounts,
    pub other_amount: i64,
    pub total: i64,
    pub source: SourceRef,
}

/// Per-month sums plus the grand total across the twelve months,
/// produced by both aggregators so the merge step handles every source
/// uniformly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub months: MonthlyAmounts,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_ref_wire_shape() {
        assert_eq!(
            serde_json::to_value(SourceRef::Donor(7)).unwrap(),
            json!({ "Donor": 7 })
        );
        assert_eq!(
            serde_json::to_value(SourceRef::SpecialDonationGroup {
                donor_name: "Hamid".to_string(),
                note: "Ramadan".to_string(),
                member_ids: vec![11, 12],
            })
            .unwrap(),
            json!({
                "SpecialDonationGroup": {
                    "donor_name": "Hamid",
                    "note": "Ramadan",
                    "member_ids": [11, 12],
                }
            })
        );
    }

    #[test]
    fn test_integrated_record_round_trips_through_json() {
        let record = IntegratedRecord {
            id: 3,
            sequence_number: 3,
            display_name: format!("{}North Gate", CHARITY_BOX_PREFIX),
            display_address: "Market".to_string(),
            months: MonthlyAmounts::zero(),
            other_amount: 0,
            total: 0,
            source: SourceRef::ExternalBox(9),
        };

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: IntegratedRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.source.edit_target(), EditTarget::ExternalBox(9));
    }
}
