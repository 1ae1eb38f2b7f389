use crate::types::Month;
use serde::{Deserialize, Serialize};

/// Headline figures for the admin dashboard, computed for one
/// (year, month) selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: Month,
    /// Routine donors whose amount for the month is greater than zero.
    pub active_donor_count: i64,
    /// Growth of the active-donor count vs the preceding month.
    pub active_donor_growth_pct: f64,
    /// Routine donation total for the month across all donors.
    pub monthly_donation_total: i64,
    /// Growth of the monthly donation total vs the preceding month.
    pub monthly_donation_growth_pct: f64,
    /// Combined external and mosque charity box total for the year.
    pub charity_box_total: i64,
    /// Announcements currently published.
    pub published_content_count: i64,
    /// Income across all four sources for the year.
    pub annual_income_total: i64,
    /// Growth of the annual income vs the prior year.
    pub annual_income_growth_pct: f64,
}

/// Month-over-month / year-over-year growth percentage.
///
/// A zero baseline with new activity reports a fixed 100% rather than
/// an undefined or infinite ratio; two zero periods report 0%.
pub fn growth_pct(prior: i64, current: i64) -> f64 {
    if prior == 0 {
        if current == 0 {
            0.0
        } else {
            100.0
        }
    } else {
        (current - prior) as f64 / prior as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_zero_baseline() {
        assert_eq!(growth_pct(0, 500), 100.0);
        assert_eq!(growth_pct(0, 0), 0.0);
    }

    #[test]
    fn test_growth_ratios() {
        assert_eq!(growth_pct(100, 150), 50.0);
        assert_eq!(growth_pct(200, 100), -50.0);
        assert_eq!(growth_pct(100, 100), 0.0);
    }
}
