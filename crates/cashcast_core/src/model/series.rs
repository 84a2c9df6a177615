//! Day-by-day balance series produced by the simulation

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::fast_days_between;

/// One balance per calendar day of the simulated window, in date order.
///
/// Days without transactions are present and carry the previous balance
/// forward. A series is never empty and is never mutated after the simulation
/// returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSeries {
    dates: Vec<Date>,
    balances: Vec<f64>,
}

impl BalanceSeries {
    pub(crate) fn with_capacity(days: usize) -> Self {
        Self {
            dates: Vec::with_capacity(days),
            balances: Vec::with_capacity(days),
        }
    }

    pub(crate) fn push(&mut self, date: Date, balance: f64) {
        debug_assert!(self.dates.last().is_none_or(|last| *last < date));
        self.dates.push(date);
        self.balances.push(balance);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn start(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    pub fn end(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Balance at the close of `date`, or `None` outside the window
    pub fn get(&self, date: Date) -> Option<f64> {
        let start = self.start()?;
        let index = usize::try_from(fast_days_between(start, date)).ok()?;
        self.balances.get(index).copied()
    }

    /// Balance on the last day of the window
    pub fn final_balance(&self) -> Option<f64> {
        self.balances.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.balances.iter().copied())
    }

    /// Parallel date and balance sequences
    pub fn split(self) -> (Vec<Date>, Vec<f64>) {
        (self.dates, self.balances)
    }
}
