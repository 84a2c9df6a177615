//! Plan files
//!
//! A plan is the YAML description a user writes by hand: the window, the
//! starting balance, interest settings, the base events (with optional
//! recurrence), what-if props, stock grants, and milestone targets.
//! `PlanFile::build` expands every recurrence and produces an engine plus the
//! list of props.
//!
//! ```yaml
//! start: 2025-01-01
//! years: 2
//! balance: 5000
//! apr: 4.0
//! min_cash: 1000
//! events:
//!   - { name: Rent, amount: -1500, date: 2025-01-01, repeat: monthly }
//!   - { name: Salary, amount: 2500, date: 2025-01-01, repeat: semi_monthly }
//! props:
//!   - name: New car
//!     events:
//!       - { name: Car, amount: -20000, date: 2025-06-01 }
//! grants:
//!   - { ticker: GOOG, shares: 400, price: 150, date: 2025-03-15 }
//! milestones: [10000, 50000]
//! ```

use std::fmt;

use cashcast_core::config::Window;
use cashcast_core::date_math::add_months;
use cashcast_core::market::{FixedPrices, StockGrant};
use cashcast_core::model::{Event, Prop, RepeatInterval, expand_semi_monthly};
use cashcast_core::query::DEFAULT_MILESTONES;
use cashcast_core::{Cast, CastError, PriceError};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

fn default_years() -> i32 {
    1
}

/// How a plan event repeats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Once,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    SemiMonthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    pub name: String,
    pub amount: f64,
    pub date: Date,
    #[serde(default)]
    pub repeat: Repeat,
    /// Last date a repeating event may land on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Date>,
}

impl PlanEvent {
    /// The concrete events this entry stands for
    pub fn expand(&self) -> Vec<Event> {
        let mut base = Event::new(self.name.clone(), self.amount, self.date);
        if let Some(until) = self.until {
            base = base.until(until);
        }

        let interval = match self.repeat {
            Repeat::Once => return vec![base],
            Repeat::SemiMonthly => return expand_semi_monthly(&base),
            Repeat::Daily => RepeatInterval::Daily,
            Repeat::Weekly => RepeatInterval::Weekly,
            Repeat::BiWeekly => RepeatInterval::BiWeekly,
            Repeat::Monthly => RepeatInterval::Monthly,
            Repeat::Quarterly => RepeatInterval::Quarterly,
            Repeat::Yearly => RepeatInterval::Yearly,
        };
        base.repeat(interval)
    }
}

fn expand_all(events: &[PlanEvent]) -> Vec<Event> {
    events.iter().flat_map(PlanEvent::expand).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProp {
    pub name: String,
    #[serde(default)]
    pub events: Vec<PlanEvent>,
}

/// A stock grant priced from the plan itself, vesting yearly from `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanGrant {
    pub ticker: String,
    pub shares: f64,
    pub price: f64,
    pub date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting_years: Option<u32>,
}

impl PlanGrant {
    fn expand(&self) -> Result<Vec<Event>, PlanError> {
        let prices = FixedPrices::new().quote(&self.ticker, self.price, self.date);
        let mut grant = StockGrant::new(&self.ticker, self.shares);
        if let Some(rate) = self.tax_rate {
            grant = grant.tax_rate(rate);
        }
        if let Some(years) = self.vesting_years {
            grant = grant.vesting_years(years);
        }

        let last_vest = i32::try_from(grant.vesting_years.saturating_sub(1))
            .ok()
            .and_then(|years| years.checked_mul(12))
            .and_then(|months| add_months(self.date, months))
            .ok_or_else(|| PlanError::VestingSchedule {
                ticker: self.ticker.clone(),
                years: grant.vesting_years,
            })?;
        let vest = grant.grant_event(&prices, self.date)?.until(last_vest);
        Ok(vest.yearly())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    pub start: Date,
    /// Window end; takes precedence over `years`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
    #[serde(default = "default_years")]
    pub years: i32,
    #[serde(default)]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cash: Option<f64>,
    #[serde(default)]
    pub events: Vec<PlanEvent>,
    #[serde(default)]
    pub props: Vec<PlanProp>,
    #[serde(default)]
    pub grants: Vec<PlanGrant>,
    /// Milestone targets; empty means the built-in 10k to 10M ladder
    #[serde(default)]
    pub milestones: Vec<f64>,
}

/// Errors turning a plan into an engine
#[derive(Debug)]
pub enum PlanError {
    Invalid(CastError),
    Grant(PriceError),
    /// Vesting that would run past the last representable date
    VestingSchedule { ticker: String, years: u32 },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Invalid(e) => write!(f, "invalid plan: {e}"),
            PlanError::Grant(e) => write!(f, "invalid stock grant: {e}"),
            PlanError::VestingSchedule { ticker, years } => {
                write!(f, "{ticker} grant cannot vest over {years} years")
            }
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Invalid(e) => Some(e),
            PlanError::Grant(e) => Some(e),
            PlanError::VestingSchedule { .. } => None,
        }
    }
}

impl From<CastError> for PlanError {
    fn from(err: CastError) -> Self {
        PlanError::Invalid(err)
    }
}

impl From<PriceError> for PlanError {
    fn from(err: PriceError) -> Self {
        PlanError::Grant(err)
    }
}

impl PlanFile {
    pub fn window(&self) -> Result<Window, CastError> {
        match self.end {
            Some(end) => Window::new(self.start, end),
            None => Window::years_from(self.start, self.years),
        }
    }

    pub fn milestones(&self) -> &[f64] {
        if self.milestones.is_empty() {
            &DEFAULT_MILESTONES[..]
        } else {
            self.milestones.as_slice()
        }
    }

    pub fn props(&self) -> Vec<Prop> {
        self.props
            .iter()
            .map(|p| Prop::new(p.name.clone(), expand_all(&p.events)))
            .collect()
    }

    /// Expand the plan into an engine (base events only) and its props
    pub fn build(&self) -> Result<(Cast, Vec<Prop>), PlanError> {
        let mut cast =
            Cast::new(self.window()?, self.balance).add_events(expand_all(&self.events));
        if let Some(apr) = self.apr {
            cast = cast.at_apr(apr);
        }
        if let Some(floor) = self.min_cash {
            cast = cast.set_min_cash(floor);
        }
        for grant in &self.grants {
            cast = cast.add_events(grant.expand()?);
        }

        tracing::info!(
            events = cast.base_events().len(),
            props = self.props.len(),
            start = %cast.window().start(),
            end = %cast.window().end(),
            "plan expanded"
        );

        Ok((cast, self.props()))
    }
}
