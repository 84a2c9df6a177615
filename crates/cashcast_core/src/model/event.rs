//! Dated cash movements
//!
//! An `Event` is a single signed amount on a single day. Recurring income and
//! spending are expanded into many concrete events up front (see
//! [`super::recurrence`]); nothing downstream ever sees a recurrence rule.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::add_months;
use crate::error::{CastError, Result};

/// How far past its first date an event keeps recurring when no horizon is given
pub const DEFAULT_HORIZON_YEARS: i32 = 50;

/// A signed amount of cash moving on a given day.
///
/// Positive amounts are inflows (salary, gifts), negative amounts are
/// outflows (rent, purchases).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: Date,
    pub amount: f64,
    /// Last date a recurring expansion of this event may land on.
    /// `None` means [`DEFAULT_HORIZON_YEARS`] after `date`.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "until")]
    pub recurrence_horizon: Option<Date>,
}

impl Event {
    #[must_use]
    pub fn new(name: impl Into<String>, amount: f64, date: Date) -> Self {
        Self {
            name: name.into(),
            date,
            amount,
            recurrence_horizon: None,
        }
    }

    /// Build an event from raw calendar components, rejecting impossible dates
    /// such as February 30th.
    pub fn from_ymd(
        name: impl Into<String>,
        amount: f64,
        year: i16,
        month: i8,
        day: i8,
    ) -> Result<Self> {
        let date =
            Date::new(year, month, day).map_err(|_| CastError::InvalidDate { year, month, day })?;
        Ok(Self::new(name, amount, date))
    }

    /// Build an event from an ISO `YYYY-MM-DD` date string
    pub fn parse(name: impl Into<String>, amount: f64, date: &str) -> Result<Self> {
        let parsed = date.parse::<Date>().map_err(|source| CastError::DateParse {
            input: date.to_string(),
            source,
        })?;
        Ok(Self::new(name, amount, parsed))
    }

    /// Set the last date recurring expansion may reach
    #[must_use]
    pub fn until(mut self, horizon: Date) -> Self {
        self.recurrence_horizon = Some(horizon);
        self
    }

    /// The effective recurrence horizon. The default horizon stops at the
    /// last representable date for events dated near year 9999.
    pub fn horizon(&self) -> Date {
        self.recurrence_horizon.unwrap_or_else(|| {
            add_months(self.date, DEFAULT_HORIZON_YEARS * 12).unwrap_or(Date::MAX)
        })
    }

    /// A concrete copy of this event on another date.
    ///
    /// Materialized instances do not carry a horizon.
    pub(crate) fn instance_on(&self, date: Date) -> Self {
        Self::new(self.name.clone(), self.amount, date)
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {} on {}", self.name, self.amount, self.date)
    }
}
