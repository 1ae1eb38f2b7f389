use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{Datelike, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Special donation entity - an ad hoc, dated, single-amount
/// contribution outside the routine/box channels.
///
/// The `year` column is denormalised from `date` by every write path;
/// the transaction date stays authoritative whenever the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDonation {
    pub id: i64,
    pub sequence_number: i64,
    pub donor_name: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub note: String,
    pub year: i32,
}

/// Database row for a special donation
#[derive(Debug, Clone, FromRow)]
pub struct SpecialDonationRow {
    pub id: i64,
    pub sequence_number: i64,
    pub donor_name: String,
    pub date: String,
    pub amount: i64,
    pub note: String,
    pub year: i32,
}

impl SpecialDonationRow {
    /// A row whose stored date no longer parses is dropped from every
    /// aggregated view instead of failing the read.
    pub fn into_entity(self) -> Option<SpecialDonation> {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(SpecialDonation {
                id: self.id,
                sequence_number: self.sequence_number,
                donor_name: self.donor_name,
                date,
                amount: self.amount,
                note: self.note,
                year: self.year,
            }),
            Err(_) => {
                warn!(
                    "Excluding special donation {} with malformed date '{}'",
                    self.id, self.date
                );
                None
            }
        }
    }
}

/// DTO for creating a special donation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSpecialDonation {
    pub donor_name: String,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub note: String,
}

impl NewSpecialDonation {
    /// The denormalised year is always taken from the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl Validate for NewSpecialDonation {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("donor_name", Some(self.donor_name.clone()))
            .required()
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("amount", Some(self.amount))
            .min(0)
            .validate()?;
        ValidationBuilder::new("note", Some(self.note.clone()))
            .max_length(1000)
            .validate()
    }
}

/// DTO for updating a special donation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSpecialDonation {
    pub donor_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub note: Option<String>,
}

impl Validate for UpdateSpecialDonation {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("donor_name", self.donor_name.clone())
            .min_length(1)
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("amount", self.amount).min(0).validate()?;
        ValidationBuilder::new("note", self.note.clone())
            .max_length(1000)
            .validate()
    }
}
