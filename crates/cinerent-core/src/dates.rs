//! # Date Helpers
//!
//! Whole-calendar-day arithmetic shared by pricing and validation.
//! All dates are `NaiveDate`; there is no time zone handling.

use chrono::NaiveDate;

/// Average year length used for ages.
const DAYS_PER_YEAR: f64 = 365.25;

/// Number of whole days from `earlier` to `later`.
///
/// Negative when `later` comes first.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use cinerent_core::dates::days_between;
///
/// let start = NaiveDate::from_ymd_opt(2050, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2050, 1, 5).unwrap();
/// assert_eq!(days_between(end, start), 4);
/// assert_eq!(days_between(start, end), -4);
/// ```
#[inline]
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Age in whole years on `today`, or `None` when the birthday is unknown.
///
/// Counts `floor(days / 365.25)`, so an upcoming birthday within the same
/// calendar year does not count yet.
pub fn age_in_years(birthday: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    let birthday = birthday?;
    let days = days_between(today, birthday);
    Some((days as f64 / DAYS_PER_YEAR).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_crosses_month_and_leap_day() {
        assert_eq!(days_between(date(2050, 2, 3), date(2050, 1, 30)), 4);
        assert_eq!(days_between(date(2048, 3, 1), date(2048, 2, 28)), 2);
        assert_eq!(days_between(date(2050, 1, 1), date(2050, 1, 1)), 0);
    }

    #[test]
    fn test_age_before_birthday() {
        // Birthday on March 16th, checked on March 13th
        assert_eq!(age_in_years(Some(date(1999, 3, 16)), date(2022, 3, 13)), Some(22));
    }

    #[test]
    fn test_age_unknown_birthday() {
        assert_eq!(age_in_years(None, date(2022, 3, 13)), None);
    }
}
