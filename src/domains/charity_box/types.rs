use crate::domains::donor::types::validate_months;
use crate::errors::DomainResult;
use crate::types::MonthlyAmounts;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{Datelike, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// External charity box entity - a physical donation box located outside
/// the mosque, tracked with twelve monthly totals per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalCharityBox {
    pub id: i64,
    pub sequence_number: i64,
    pub label: String,
    pub location: String,
    pub year: i32,
    pub months: MonthlyAmounts,
}

impl ExternalCharityBox {
    pub fn total(&self) -> i64 {
        self.months.sum()
    }
}

/// Database row for an external charity box
#[derive(Debug, Clone, FromRow)]
pub struct ExternalCharityBoxRow {
    pub id: i64,
    pub sequence_number: i64,
    pub label: String,
    pub location: String,
    pub year: i32,
    pub january: i64,
    pub february: i64,
    pub march: i64,
    pub april: i64,
    pub may: i64,
    pub june: i64,
    pub july: i64,
    pub august: i64,
    pub september: i64,
    pub october: i64,
    pub november: i64,
    pub december: i64,
}

impl From<ExternalCharityBoxRow> for ExternalCharityBox {
    fn from(row: ExternalCharityBoxRow) -> Self {
        ExternalCharityBox {
            id: row.id,
            sequence_number: row.sequence_number,
            label: row.label,
            location: row.location,
            year: row.year,
            months: MonthlyAmounts {
                january: row.january,
                february: row.february,
                march: row.march,
                april: row.april,
                may: row.may,
                june: row.june,
                july: row.july,
                august: row.august,
                september: row.september,
                october: row.october,
                november: row.november,
                december: row.december,
            },
        }
    }
}

/// DTO for creating an external charity box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExternalCharityBox {
    pub label: String,
    pub location: String,
    pub year: i32,
    #[serde(default)]
    pub months: MonthlyAmounts,
}

impl Validate for NewExternalCharityBox {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("label", Some(self.label.clone()))
            .required()
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("year", Some(self.year))
            .range(2000, 2100)
            .validate()?;
        validate_months(&self.months)
    }
}

/// DTO for updating an external charity box
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExternalCharityBox {
    pub label: Option<String>,
    pub location: Option<String>,
    pub months: Option<MonthlyAmounts>,
}

impl Validate for UpdateExternalCharityBox {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("label", self.label.clone())
            .min_length(1)
            .max_length(255)
            .validate()?;
        if let Some(months) = &self.months {
            validate_months(months)?;
        }
        Ok(())
    }
}

/// Mosque charity box entity - one emptied-box collection, dated.
///
/// The `year` column is denormalised from `date` by every write path;
/// the transaction date stays authoritative whenever the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosqueCharityBox {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: i64,
    pub year: i32,
}

/// Database row for a mosque charity box collection
#[derive(Debug, Clone, FromRow)]
pub struct MosqueCharityBoxRow {
    pub id: i64,
    pub date: String,
    pub amount: i64,
    pub year: i32,
}

impl MosqueCharityBoxRow {
    /// A row whose stored date no longer parses is dropped from every
    /// aggregated view instead of failing the read.
    pub fn into_entity(self) -> Option<MosqueCharityBox> {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(MosqueCharityBox {
                id: self.id,
                date,
                amount: self.amount,
                year: self.year,
            }),
            Err(_) => {
                warn!(
                    "Excluding mosque charity box {} with malformed date '{}'",
                    self.id, self.date
                );
                None
            }
        }
    }
}

/// DTO for creating a mosque charity box collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMosqueCharityBox {
    pub date: NaiveDate,
    pub amount: i64,
}

impl NewMosqueCharityBox {
    /// The denormalised year is always taken from the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl Validate for NewMosqueCharityBox {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("amount", Some(self.amount))
            .min(0)
            .validate()
    }
}

/// DTO for updating a mosque charity box collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMosqueCharityBox {
    pub date: Option<NaiveDate>,
    pub amount: Option<i64>,
}

impl Validate for UpdateMosqueCharityBox {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("amount", self.amount).min(0).validate()
    }
}
