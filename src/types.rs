use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Year pickers always have something to select: an empty year list
/// falls back to the current calendar year.
pub fn years_or_current(years: Vec<i32>) -> Vec<i32> {
    if years.is_empty() {
        vec![Local::now().year()]
    } else {
        years
    }
}

/// Calendar month, in fixed calendar order.
///
/// Used as the column key for every monthly breakdown in the crate: the
/// twelve amount fields on donors and charity boxes, the buckets produced
/// by the date-bucketed aggregator, and the report columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s.to_lowercase())
    }

    /// 0-based calendar index (January = 0).
    pub fn index0(&self) -> usize {
        *self as usize
    }

    /// 1-based calendar number (January = 1).
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_index0(index: usize) -> Option<Self> {
        Month::ALL.get(index).copied()
    }

    pub fn from_number(number: u32) -> Option<Self> {
        if number == 0 {
            return None;
        }
        Month::from_index0(number as usize - 1)
    }

    /// Month component of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        // month0 is always 0..=11, so the lookup cannot miss
        Month::ALL[date.month0() as usize]
    }

    /// Preceding calendar month; January wraps to December (the caller
    /// owns the matching year decrement).
    pub fn prev(&self) -> Self {
        match self {
            Month::January => Month::December,
            other => Month::ALL[other.index0() - 1],
        }
    }

    /// First day of this month in the given year.
    pub fn first_day(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.number(), 1)
    }

    /// Last day of this month in the given year, leap-aware.
    pub fn last_day(&self, year: i32) -> Option<NaiveDate> {
        let next_first = match self {
            Month::December => NaiveDate::from_ymd_opt(year + 1, 1, 1),
            other => NaiveDate::from_ymd_opt(year, other.number() + 1, 1),
        };
        next_first.map(|d| d.pred_opt().unwrap_or(d))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Twelve monthly amounts in integer currency units, calendar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmounts {
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

impl MonthlyAmounts {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, month: Month) -> i64 {
        match month {
            Month::January => self.january,
            Month::February => self.february,
            Month::March => self.march,
            Month::April => self.april,
            Month::May => self.may,
            Month::June => self.june,
            Month::July => self.july,
            Month::August => self.august,
            Month::September => self.september,
            Month::October => self.october,
            Month::November => self.november,
            Month::December => self.december,
        }
    }

    pub fn set(&mut self, month: Month, amount: i64) {
        match month {
            Month::January => self.january = amount,
            Month::February => self.february = amount,
            Month::March => self.march = amount,
            Month::April => self.april = amount,
            Month::May => self.may = amount,
            Month::June => self.june = amount,
            Month::July => self.july = amount,
            Month::August => self.august = amount,
            Month::September => self.september = amount,
            Month::October => self.october = amount,
            Month::November => self.november = amount,
            Month::December => self.december = amount,
        }
    }

    pub fn add(&mut self, month: Month, amount: i64) {
        self.set(month, self.get(month) + amount);
    }

    /// Add every month of another breakdown into this one.
    pub fn add_all(&mut self, other: &MonthlyAmounts) {
        for month in Month::ALL {
            self.add(month, other.get(month));
        }
    }

    /// Sum across the twelve months.
    pub fn sum(&self) -> i64 {
        Month::ALL.iter().map(|m| self.get(*m)).sum()
    }

    /// (month, amount) pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, i64)> + '_ {
        Month::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    /// True when every month is negative-free.
    pub fn is_non_negative(&self) -> bool {
        Month::ALL.iter().all(|m| self.get(*m) >= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_roundtrip() {
        for month in Month::ALL {
            assert_eq!(Month::from_str(month.as_str()), Some(month));
            assert_eq!(Month::from_index0(month.index0()), Some(month));
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_index0(12), None);
        assert_eq!(Month::from_number(0), None);
    }

    #[test]
    fn test_month_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(Month::from_date(date), Month::March);
    }

    #[test]
    fn test_month_prev_wraps() {
        assert_eq!(Month::January.prev(), Month::December);
        assert_eq!(Month::July.prev(), Month::June);
    }

    #[test]
    fn test_month_bounds_leap_year() {
        assert_eq!(
            Month::February.last_day(2024),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            Month::February.last_day(2025),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(
            Month::December.last_day(2025),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
    }

    #[test]
    fn test_monthly_amounts_sum_and_add() {
        let mut amounts = MonthlyAmounts::zero();
        assert_eq!(amounts.sum(), 0);

        amounts.add(Month::January, 100_000);
        amounts.add(Month::January, 50_000);
        amounts.set(Month::December, 25_000);
        assert_eq!(amounts.get(Month::January), 150_000);
        assert_eq!(amounts.sum(), 175_000);
        assert!(amounts.is_non_negative());
    }
}
