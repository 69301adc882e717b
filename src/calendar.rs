//! Calendar advancement across variable time scales.
//!
//! Elapsed time is tracked in sixtieths of a month so every supported
//! scale advances exactly, the same way prices elsewhere are kept in
//! integer cents. Thirty day-scale turns therefore advance the month by
//! exactly one; nothing is lost to flooring.

use crate::constants::{MONTHS_PER_YEAR, SIXTIETHS_PER_MONTH};
use crate::state::TimeScale;

/// Result of advancing the calendar by one directive's elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStep {
    pub month: u8,
    pub month_sixtieths: u8,
    pub year: i32,
    pub age: u32,
    /// Whole years crossed by this step.
    pub years_added: u32,
    /// Elapsed time applied, in sixtieths of a month.
    pub elapsed_sixtieths: u32,
}

/// Advance `(month, sub-month progress, year, age)` by one time scale.
///
/// Age and year advance only on whole-year boundaries; the sub-month
/// remainder is returned so the caller can persist it across turns.
#[must_use]
pub fn advance_calendar(
    month: u8,
    month_sixtieths: u8,
    year: i32,
    age: u32,
    scale: TimeScale,
) -> CalendarStep {
    let elapsed = scale.sixtieths();
    let sixtieths_per_year = MONTHS_PER_YEAR * SIXTIETHS_PER_MONTH;

    let total = u32::from(month.saturating_sub(1)) * SIXTIETHS_PER_MONTH
        + u32::from(month_sixtieths)
        + elapsed;
    let years_added = total / sixtieths_per_year;
    let month_index = (total / SIXTIETHS_PER_MONTH) % MONTHS_PER_YEAR;
    let remainder = total % SIXTIETHS_PER_MONTH;

    CalendarStep {
        month: u8::try_from(month_index + 1).unwrap_or(1),
        month_sixtieths: u8::try_from(remainder).unwrap_or(0),
        year: year.saturating_add(i32::try_from(years_added).unwrap_or(0)),
        age: age.saturating_add(years_added),
        years_added,
        elapsed_sixtieths: elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(month: u8, frac: u8, scale: TimeScale) -> CalendarStep {
        advance_calendar(month, frac, 1400, 20, scale)
    }

    #[test]
    fn four_weeks_advance_exactly_one_month() {
        let mut month = 3;
        let mut frac = 0;
        for _ in 0..4 {
            let next = step(month, frac, TimeScale::Week);
            month = next.month;
            frac = next.month_sixtieths;
        }
        assert_eq!(month, 4);
        assert_eq!(frac, 0);
    }

    #[test]
    fn thirty_days_advance_exactly_one_month() {
        let mut month = 6;
        let mut frac = 0;
        for _ in 0..30 {
            let next = step(month, frac, TimeScale::Day);
            month = next.month;
            frac = next.month_sixtieths;
        }
        assert_eq!(month, 7);
        assert_eq!(frac, 0);
    }

    #[test]
    fn single_day_preserves_fractional_progress() {
        let next = step(5, 0, TimeScale::Day);
        assert_eq!(next.month, 5);
        assert_eq!(next.month_sixtieths, 2);
        assert_eq!(next.years_added, 0);
    }

    #[test]
    fn year_scale_advances_year_and_age_leaving_month_alone() {
        let next = advance_calendar(8, 30, 1400, 25, TimeScale::Year);
        assert_eq!(next.month, 8);
        assert_eq!(next.month_sixtieths, 30);
        assert_eq!(next.year, 1401);
        assert_eq!(next.age, 26);
        assert_eq!(next.years_added, 1);
    }

    #[test]
    fn five_year_scale_advances_five_years() {
        let next = advance_calendar(2, 0, 1400, 14, TimeScale::FiveYears);
        assert_eq!(next.year, 1405);
        assert_eq!(next.age, 19);
        assert_eq!(next.month, 2);
    }

    #[test]
    fn december_month_rollover_carries_the_year() {
        let next = advance_calendar(12, 0, 1400, 30, TimeScale::Month);
        assert_eq!(next.month, 1);
        assert_eq!(next.year, 1401);
        assert_eq!(next.age, 31);
    }
}
