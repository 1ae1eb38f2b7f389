use crate::domains::integration::types::MonthlyTotals;
use crate::types::{Month, MonthlyAmounts};
use chrono::{Datelike, NaiveDate};

/// Monthly aggregator: per-month sums across records that carry a
/// twelve-month breakdown, plus the grand total. Empty input yields
/// all-zero sums.
pub fn sum_monthly<'a, I>(breakdowns: I) -> MonthlyTotals
where
    I: IntoIterator<Item = &'a MonthlyAmounts>,
{
    let mut months = MonthlyAmounts::zero();
    for breakdown in breakdowns {
        months.add_all(breakdown);
    }
    MonthlyTotals {
        total: months.sum(),
        months,
    }
}

/// Date-bucketed aggregator: amounts of dated records bucketed into the
/// calendar months of the target year. A record dated outside the year
/// contributes nothing; the date decides membership, not any
/// denormalised year field carried alongside it.
pub fn bucket_by_month<I>(dated_amounts: I, year: i32) -> MonthlyTotals
where
    I: IntoIterator<Item = (NaiveDate, i64)>,
{
    let mut months = MonthlyAmounts::zero();
    for (date, amount) in dated_amounts {
        if date.year() != year {
            continue;
        }
        months.add(Month::from_date(date), amount);
    }
    MonthlyTotals {
        total: months.sum(),
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sum_monthly_two_donors() {
        let mut a = MonthlyAmounts::zero();
        a.set(Month::January, 100_000);
        let mut b = MonthlyAmounts::zero();
        b.set(Month::January, 50_000);
        b.set(Month::February, 200_000);

        let totals = sum_monthly([&a, &b]);
        assert_eq!(totals.months.get(Month::January), 150_000);
        assert_eq!(totals.months.get(Month::February), 200_000);
        assert_eq!(totals.total, 350_000);
    }

    #[test]
    fn test_sum_monthly_empty() {
        let totals = sum_monthly(std::iter::empty());
        assert_eq!(totals.months, MonthlyAmounts::zero());
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn test_bucket_by_month_scenario() {
        let totals = bucket_by_month(
            [(date(2025, 1, 15), 75_000), (date(2025, 3, 2), 25_000)],
            2025,
        );
        assert_eq!(totals.months.get(Month::January), 75_000);
        assert_eq!(totals.months.get(Month::March), 25_000);
        assert_eq!(totals.months.get(Month::February), 0);
        assert_eq!(totals.total, 100_000);
    }

    #[test]
    fn test_bucket_year_boundaries() {
        let totals = bucket_by_month(
            [
                (date(2025, 12, 31), 10_000), // last day in
                (date(2026, 1, 1), 99_000),   // first day of next year out
                (date(2024, 12, 31), 99_000), // prior year out
            ],
            2025,
        );
        assert_eq!(totals.months.get(Month::December), 10_000);
        assert_eq!(totals.total, 10_000);
    }
}
