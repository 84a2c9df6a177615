//! Persisted engine state
//!
//! The serialized form stores concrete events only. Recurring events must be
//! expanded before a snapshot is taken; there is no way to store a rule.
//! Reading and writing files is left to the caller.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{SimulationParams, Window};
use crate::cast::Cast;
use crate::error::Result;
use crate::model::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastSnapshot {
    pub events: Vec<Event>,
    pub start: Date,
    pub end: Date,
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cash: Option<f64>,
}

impl CastSnapshot {
    /// Snapshot the effective universe, active overlay included
    pub fn from_cast(cast: &Cast) -> Self {
        Self::with_events(cast, cast.events())
    }

    /// Snapshot the base events only, leaving any active overlay out
    pub fn from_cast_base(cast: &Cast) -> Self {
        Self::with_events(cast, cast.base_events().iter())
    }

    fn with_events<'a>(cast: &Cast, events: impl Iterator<Item = &'a Event>) -> Self {
        let params = cast.params();
        Self {
            events: events
                .map(|e| Event::new(e.name.clone(), e.amount, e.date))
                .collect(),
            start: params.window.start(),
            end: params.window.end(),
            balance: params.initial_balance,
            apr: params.apr,
            min_cash: params.min_cash_floor,
        }
    }

    /// Rebuild an engine with the stored events as its base events
    pub fn into_cast(self) -> Result<Cast> {
        let window = Window::new(self.start, self.end)?;
        let params = SimulationParams {
            window,
            initial_balance: self.balance,
            apr: self.apr,
            min_cash_floor: self.min_cash,
            change_only: false,
        };
        Ok(Cast::from_params(params).add_events(self.events))
    }
}
