//! Calendar arithmetic for the daily walk and recurrence expansion.
//!
//! The simulation visits every day of its window, so day stepping uses Rata
//! Die day numbers (O(1) conversions, no `jiff::Span` normalisation).
//! Month stepping clamps the day-of-month to the target month's length so
//! that month-end anchors never produce an invalid date.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days-in-month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
///
/// Uses the proleptic Gregorian calendar algorithm from Baum (2017).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2.div_euclid(4) - y2.div_euclid(100)
        + y2.div_euclid(400)
        - 306
}

/// Number of days between two dates (`d2 - d1`), positive when `d2 > d1`.
#[inline]
pub fn fast_days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Add `n` days to a date without going through `jiff::Span`.
///
/// `None` when the result falls outside jiff's supported range.
#[inline]
pub fn add_days(d: Date, n: i32) -> Option<Date> {
    rd_to_date(i64::from(rata_die(d)) + i64::from(n))
}

/// Add `n` calendar months, clamping the day to the target month's length.
///
/// `2024-01-31 + 1 month` is `2024-02-29`; `2024-01-31 + 2 months` is
/// `2024-03-31`. Recurrences always step from their anchor, so a clamp in one
/// month never leaks into the next. `None` past year 9999 (or before -9999).
#[inline]
pub fn add_months(d: Date, n: i32) -> Option<Date> {
    let total_months = i64::from(d.year()) * 12 + i64::from(d.month()) - 1 + i64::from(n);
    let year = i16::try_from(total_months.div_euclid(12)).ok()?;
    let month = (total_months.rem_euclid(12) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    Date::new(year, month, day).ok()
}

/// Inverse of `rata_die()`; `None` outside jiff's date range.
#[inline]
fn rd_to_date(rd: i64) -> Option<Date> {
    // Shift so day 0 = March 1, year 0
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h.div_euclid(3_652_425);
    let b = a - a.div_euclid(4);
    let y = (100 * b + h).div_euclid(36_525);
    let c = b + z - 365 * y - y.div_euclid(4);
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    Date::new(i16::try_from(year).ok()?, month as i8, day as i8).ok()
}
