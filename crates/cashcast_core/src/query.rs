//! Questions asked of a balance series
//!
//! Searches scan the series in date order and report the *first* qualifying
//! day. When no day qualifies they return [`SENTINEL_DATE`] rather than an
//! error; callers check with [`is_sentinel`].

use jiff::civil::Date;
use serde::Serialize;

use crate::cast::Cast;
use crate::date_math::fast_days_between;
use crate::model::BalanceSeries;

/// Returned by searches that find no qualifying day in the window
pub const SENTINEL_DATE: Date = jiff::civil::date(1970, 1, 1);

/// Milestone targets, 10k through 10M
pub const DEFAULT_MILESTONES: [f64; 20] = [
    10_000.0,
    20_000.0,
    50_000.0,
    75_000.0,
    100_000.0,
    150_000.0,
    250_000.0,
    300_000.0,
    400_000.0,
    500_000.0,
    750_000.0,
    1_000_000.0,
    2_000_000.0,
    3_000_000.0,
    4_000_000.0,
    5_000_000.0,
    6_000_000.0,
    7_000_000.0,
    8_000_000.0,
    10_000_000.0,
];

#[inline]
pub fn is_sentinel(date: Date) -> bool {
    date == SENTINEL_DATE
}

fn first_where(series: &BalanceSeries, pred: impl Fn(f64) -> bool) -> Option<(Date, f64)> {
    series.iter().find(|(_, balance)| pred(*balance))
}

/// Earliest day whose balance is at least `threshold`
pub fn first_day_over(series: &BalanceSeries, threshold: f64) -> Date {
    first_day_over_with_balance(series, threshold).0
}

/// Earliest day whose balance is at least `threshold`, with that balance.
/// The balance is `None` exactly when the date is the sentinel.
pub fn first_day_over_with_balance(series: &BalanceSeries, threshold: f64) -> (Date, Option<f64>) {
    match first_where(series, |b| b >= threshold) {
        Some((date, balance)) => (date, Some(balance)),
        None => (SENTINEL_DATE, None),
    }
}

/// Earliest day whose balance is at most `threshold`.
///
/// This is the first dip, not the lowest point: a balance that falls under
/// the threshold and recovers still reports the day it fell.
pub fn first_day_under(series: &BalanceSeries, threshold: f64) -> Date {
    first_where(series, |b| b <= threshold)
        .map(|(date, _)| date)
        .unwrap_or(SENTINEL_DATE)
}

/// The `n` smallest balances in the series, ascending
pub fn min_n_balances(series: &BalanceSeries, n: usize) -> Vec<f64> {
    let mut balances = series.balances().to_vec();
    balances.sort_by(f64::total_cmp);
    balances.truncate(n);
    balances
}

/// Where a milestone stands relative to the simulated window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MilestoneStatus {
    /// The starting balance already meets the target
    Passed,
    /// First crossed on `date` with `balance`, `years_until` after today
    Reached {
        date: Date,
        balance: f64,
        years_until: f64,
    },
    /// Not crossed inside the window
    NotReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneRow {
    pub amount: f64,
    pub status: MilestoneStatus,
}

impl MilestoneRow {
    pub fn is_passed(&self) -> bool {
        matches!(self.status, MilestoneStatus::Passed)
    }

    pub fn date(&self) -> Option<Date> {
        match self.status {
            MilestoneStatus::Reached { date, .. } => Some(date),
            _ => None,
        }
    }
}

/// First-crossing date and time-to-target for each milestone.
///
/// The engine is simulated once and every target is searched on the same
/// series. `today` anchors the `years_until` figure (`days / 365`).
pub fn milestone_table(cast: &Cast, milestones: &[f64], today: Date) -> Vec<MilestoneRow> {
    let series = cast.running_balance();
    let window = cast.window();

    milestones
        .iter()
        .map(|&amount| {
            let status = if cast.initial_balance() >= amount {
                MilestoneStatus::Passed
            } else {
                match first_day_over_with_balance(&series, amount) {
                    (date, Some(balance)) if !is_sentinel(date) && window.contains(date) => {
                        MilestoneStatus::Reached {
                            date,
                            balance,
                            years_until: fast_days_between(today, date) as f64 / 365.0,
                        }
                    }
                    _ => MilestoneStatus::NotReached,
                }
            };
            MilestoneRow { amount, status }
        })
        .collect()
}

/// Keep rows that are passed or reached, dropping the `NotReached` ones
pub fn reached_only(rows: &[MilestoneRow]) -> Vec<MilestoneRow> {
    rows.iter()
        .filter(|row| !matches!(row.status, MilestoneStatus::NotReached))
        .copied()
        .collect()
}
