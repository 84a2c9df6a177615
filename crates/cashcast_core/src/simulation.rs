//! The daily balance walk
//!
//! Events are bucketed by day, then every day of the window is visited once
//! in order. Cost is `O(days + events)`.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::config::SimulationParams;
use crate::date_math::add_days;
use crate::model::{BalanceSeries, Event};

/// Run the balance walk over `base` plus `overlay` events.
///
/// The effective event universe is exactly the two slices; nothing is cached
/// between calls. Events outside the window never affect the result.
pub fn simulate(params: &SimulationParams, base: &[Event], overlay: &[Event]) -> BalanceSeries {
    let window = params.window;
    let transactions = transactions_by_day(params, base.iter().chain(overlay));
    let daily_rate = params.daily_rate();

    tracing::debug!(
        start = %window.start(),
        end = %window.end(),
        events = base.len() + overlay.len(),
        active_days = transactions.len(),
        "running balance walk"
    );

    let days = window.days();
    let mut series = BalanceSeries::with_capacity(days as usize);
    let mut balance = params.initial_balance;

    for offset in 0..days {
        let Some(date) = add_days(window.start(), offset) else {
            break;
        };
        let day_sum = transactions.get(&date).copied();

        balance = if params.change_only {
            day_sum.unwrap_or(0.0)
        } else {
            balance + day_sum.unwrap_or(0.0)
        };

        if let Some(rate) = daily_rate {
            balance = compound(balance, rate, params.min_cash_floor);
        }

        series.push(date, balance);
    }

    series
}

/// Net amount per day for the events that fall inside the window.
/// Same-day events sum algebraically.
fn transactions_by_day<'a>(
    params: &SimulationParams,
    events: impl Iterator<Item = &'a Event>,
) -> FxHashMap<Date, f64> {
    let mut by_day = FxHashMap::default();
    for event in events.filter(|e| params.window.contains(e.date)) {
        *by_day.entry(event.date).or_insert(0.0) += event.amount;
    }
    by_day
}

/// One day of interest. Only the part of the balance above the floor grows;
/// at or below the floor (or with no floor) the whole balance is multiplied,
/// so a negative balance grows more negative.
#[inline]
fn compound(balance: f64, rate: f64, floor: Option<f64>) -> f64 {
    match floor {
        Some(floor) if balance > floor => (balance - floor) * rate + floor,
        _ => balance * rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_above_floor() {
        let rate = 1.01;
        assert!((compound(1_500.0, rate, Some(1_000.0)) - 1_505.0).abs() < 1e-9);
        assert!((compound(1_500.0, rate, None) - 1_515.0).abs() < 1e-9);
    }

    #[test]
    fn test_compound_at_or_below_floor_multiplies_whole_balance() {
        let rate = 1.01;
        assert!((compound(1_000.0, rate, Some(1_000.0)) - 1_010.0).abs() < 1e-9);
        assert!((compound(-100.0, rate, Some(1_000.0)) - -101.0).abs() < 1e-9);
        assert!((compound(-100.0, rate, None) - -101.0).abs() < 1e-9);
    }
}
