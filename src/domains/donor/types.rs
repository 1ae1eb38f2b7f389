use crate::errors::{DomainResult, ValidationError};
use crate::types::MonthlyAmounts;
use crate::validation::{Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Routine donor entity - a recurring named contributor tracked with
/// twelve monthly contribution amounts per year, plus a free "other
/// contributions" amount outside the monthly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDonor {
    pub id: i64,
    pub sequence_number: i64,
    pub name: String,
    pub address: String,
    pub year: i32,
    pub months: MonthlyAmounts,
    pub other_amount: i64,
}

impl RoutineDonor {
    /// Annual total: twelve months plus the "other contributions" amount.
    pub fn total(&self) -> i64 {
        self.months.sum() + self.other_amount
    }
}

/// Database row for a routine donor
#[derive(Debug, Clone, FromRow)]
pub struct RoutineDonorRow {
    pub id: i64,
    pub sequence_number: i64,
    pub name: String,
    pub address: String,
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
    pub other_amount: i64,
}

impl From<RoutineDonorRow> for RoutineDonor {
    fn from(row: RoutineDonorRow) -> Self {
        RoutineDonor {
            id: row.id,
            sequence_number: row.sequence_number,
            name: row.name,
            address: row.address,
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
            other_amount: row.other_amount,
        }
    }
}

/// DTO for creating a routine donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoutineDonor {
    pub name: String,
    pub address: String,
    pub year: i32,
    #[serde(default)]
    pub months: MonthlyAmounts,
    #[serde(default)]
    pub other_amount: i64,
}

impl Validate for NewRoutineDonor {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", Some(self.name.clone()))
            .required()
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("year", Some(self.year))
            .range(2000, 2100)
            .validate()?;
        ValidationBuilder::new("other_amount", Some(self.other_amount))
            .min(0)
            .validate()?;
        validate_months(&self.months)
    }
}

/// DTO for updating a routine donor; only provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoutineDonor {
    pub name: Option<String>,
    pub address: Option<String>,
    pub months: Option<MonthlyAmounts>,
    pub other_amount: Option<i64>,
}

impl Validate for UpdateRoutineDonor {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", self.name.clone())
            .min_length(1)
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("other_amount", self.other_amount)
            .min(0)
            .validate()?;
        if let Some(months) = &self.months {
            validate_months(months)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_months(months: &MonthlyAmounts) -> DomainResult<()> {
    if months.is_non_negative() {
        Ok(())
    } else {
        Err(ValidationError::invalid_value("months", "monthly amounts cannot be negative").into())
    }
}
