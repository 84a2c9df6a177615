//! Simulation parameters
//!
//! `SimulationParams` is the immutable value handed to
//! [`crate::simulation::simulate`]. It is usually assembled through
//! [`crate::Cast`], which pairs it with the event lists.
//!
//! ```ignore
//! use cashcast_core::config::{SimulationParams, Window};
//!
//! let window = Window::years_from(jiff::civil::date(2025, 1, 1), 1)?;
//! let params = SimulationParams::new(window)
//!     .initial_balance(5_000.0)
//!     .apr(4.0)
//!     .min_cash_floor(1_000.0);
//! ```

use jiff::civil::Date;
use serde::Serialize;

use crate::date_math::fast_days_between;
use crate::error::{CastError, Result};

pub mod snapshot;

pub use snapshot::CastSnapshot;

/// Longest window the simulation will enumerate (200 years of days)
pub const MAX_WINDOW_DAYS: i32 = 200 * 366;

/// Inclusive calendar window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    start: Date,
    end: Date,
}

impl Window {
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(CastError::InvalidWindow { start, end });
        }
        let days = fast_days_between(start, end);
        if days > MAX_WINDOW_DAYS {
            return Err(CastError::WindowTooLong {
                days,
                max_days: MAX_WINDOW_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    /// Window from `start` through `start + span`
    pub fn after(start: Date, span: jiff::Span) -> Result<Self> {
        let end = start.checked_add(span)?;
        Self::new(start, end)
    }

    /// Window from `start` through the same day `years` later
    /// (Feb 29 clamps to Feb 28 in common years)
    pub fn years_from(start: Date, years: i32) -> Result<Self> {
        let span = jiff::Span::new().try_years(years)?;
        Self::after(start, span)
    }

    /// A window covering only `date`
    pub fn single_day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the window, both ends included
    pub fn days(&self) -> i32 {
        fast_days_between(self.start, self.end) + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Everything the balance walk needs besides the events themselves
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParams {
    pub window: Window,
    /// Balance before the first day's transactions
    pub initial_balance: f64,
    /// Annual percentage rate (`4.0` means 4%), compounded daily
    pub apr: Option<f64>,
    /// Reserve that never earns interest; only the excess compounds
    pub min_cash_floor: Option<f64>,
    /// Report each day's net movement instead of a running balance
    pub change_only: bool,
}

impl SimulationParams {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            window,
            initial_balance: 0.0,
            apr: None,
            min_cash_floor: None,
            change_only: false,
        }
    }

    #[must_use]
    pub fn initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = balance;
        self
    }

    #[must_use]
    pub fn apr(mut self, apr: f64) -> Self {
        self.apr = Some(apr);
        self
    }

    #[must_use]
    pub fn min_cash_floor(mut self, floor: f64) -> Self {
        self.min_cash_floor = Some(floor);
        self
    }

    #[must_use]
    pub fn change_only(mut self, change_only: bool) -> Self {
        self.change_only = change_only;
        self
    }

    /// Daily growth factor `1 + (apr / 100) / 365`, when interest applies
    pub fn daily_rate(&self) -> Option<f64> {
        if self.change_only {
            return None;
        }
        self.apr.map(|apr| 1.0 + (apr / 100.0) / 365.0)
    }
}
