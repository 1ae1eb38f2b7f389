use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{Datelike, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Ledger entry kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerKind {
    Income,
    Expense,
}

impl LedgerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Income => "income",
            LedgerKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(LedgerKind::Income),
            "expense" => Some(LedgerKind::Expense),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["income", "expense"]
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger entry entity - one dated, categorised income or expense
/// record feeding the annual reconciliation report.
///
/// The `year` column is denormalised from `date` by every write path;
/// the transaction date stays authoritative whenever the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub kind: LedgerKind,
    pub category: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub note: String,
    pub year: i32,
}

/// Database row for a ledger entry
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryRow {
    pub id: i64,
    pub kind: String,
    pub category: String,
    pub date: String,
    pub amount: i64,
    pub note: String,
    pub year: i32,
}

impl LedgerEntryRow {
    /// A row with an unparseable kind or date is dropped from every
    /// aggregated view instead of failing the read.
    pub fn into_entity(self) -> Option<LedgerEntry> {
        let kind = match LedgerKind::from_str(&self.kind) {
            Some(kind) => kind,
            None => {
                warn!(
                    "Excluding ledger entry {} with unknown kind '{}'",
                    self.id, self.kind
                );
                return None;
            }
        };
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(LedgerEntry {
                id: self.id,
                kind,
                category: self.category,
                date,
                amount: self.amount,
                note: self.note,
                year: self.year,
            }),
            Err(_) => {
                warn!(
                    "Excluding ledger entry {} with malformed date '{}'",
                    self.id, self.date
                );
                None
            }
        }
    }
}

/// DTO for creating a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    pub kind: LedgerKind,
    pub category: String,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub note: String,
}

impl NewLedgerEntry {
    /// The denormalised year is always taken from the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl Validate for NewLedgerEntry {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("category", Some(self.category.clone()))
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

/// DTO for updating a ledger entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLedgerEntry {
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub note: Option<String>,
}

impl Validate for UpdateLedgerEntry {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("category", self.category.clone())
            .min_length(1)
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("amount", self.amount).min(0).validate()?;
        ValidationBuilder::new("note", self.note.clone())
            .max_length(1000)
            .validate()
    }
}
