//! The forecast engine
//!
//! A `Cast` pairs [`SimulationParams`] with a base event list and a single
//! overlay slot for what-if props. Every call to
//! [`Cast::running_balance`] recomputes the series from scratch through the
//! pure [`simulate`] function.
//!
//! ```ignore
//! use cashcast_core::{Cast, config::Window, model::{Event, Prop}};
//!
//! let window = Window::years_from(jiff::civil::date(2025, 1, 1), 1)?;
//! let mut cast = Cast::new(window, 5_000.0)
//!     .at_apr(4.0)
//!     .add_events(Event::new("Rent", -1_500.0, window.start()).monthly());
//!
//! cast.with_prop(&Prop::new("New car", vec![car]));
//! let series = cast.running_balance();
//! cast.clear_props();
//! ```

use jiff::civil::Date;

use crate::config::{SimulationParams, Window};
use crate::model::{BalanceSeries, Event, Prop};
use crate::simulation::simulate;

#[derive(Debug, Clone)]
pub struct Cast {
    params: SimulationParams,
    base_events: Vec<Event>,
    /// Events from every prop activated since the last `clear_props`
    overlay_events: Vec<Event>,
}

impl Cast {
    #[must_use]
    pub fn new(window: Window, initial_balance: f64) -> Self {
        Self::from_params(SimulationParams::new(window).initial_balance(initial_balance))
    }

    #[must_use]
    pub fn from_params(params: SimulationParams) -> Self {
        Self {
            params,
            base_events: Vec::new(),
            overlay_events: Vec::new(),
        }
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    #[must_use]
    pub fn at_apr(mut self, apr: f64) -> Self {
        self.params.apr = Some(apr);
        self
    }

    #[must_use]
    pub fn without_apr(mut self) -> Self {
        self.params.apr = None;
        self
    }

    #[must_use]
    pub fn set_min_cash(mut self, floor: f64) -> Self {
        self.params.min_cash_floor = Some(floor);
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: Window) -> Self {
        self.params.window = window;
        self
    }

    #[must_use]
    pub fn with_balance(mut self, balance: f64) -> Self {
        self.params.initial_balance = balance;
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn window(&self) -> Window {
        self.params.window
    }

    pub fn initial_balance(&self) -> f64 {
        self.params.initial_balance
    }

    // =========================================================================
    // Base events
    // =========================================================================

    #[must_use]
    pub fn add_event(mut self, event: Event) -> Self {
        self.base_events.push(event);
        self
    }

    #[must_use]
    pub fn add_events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.base_events.extend(events);
        self
    }

    /// Drop base and overlay events that fall outside the window
    #[must_use]
    pub fn trim(mut self) -> Self {
        let window = self.params.window;
        self.base_events.retain(|e| window.contains(e.date));
        self.overlay_events.retain(|e| window.contains(e.date));
        self
    }

    pub fn base_events(&self) -> &[Event] {
        &self.base_events
    }

    pub fn overlay_events(&self) -> &[Event] {
        &self.overlay_events
    }

    /// The effective event universe: base events, then active overlay events
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.base_events.iter().chain(&self.overlay_events)
    }

    /// Date of the latest event in the effective universe
    pub fn last_day(&self) -> Option<Date> {
        self.events().map(|e| e.date).max()
    }

    // =========================================================================
    // Overlay slot
    // =========================================================================

    /// Activate a prop. Activating again without clearing accumulates.
    pub fn with_prop(&mut self, prop: &Prop) -> &mut Self {
        self.overlay_events.extend(prop.events.iter().cloned());
        self
    }

    pub fn with_props<'a>(&mut self, props: impl IntoIterator<Item = &'a Prop>) -> &mut Self {
        for prop in props {
            self.with_prop(prop);
        }
        self
    }

    /// Empty the overlay slot, restoring the base-only universe
    pub fn clear_props(&mut self) -> &mut Self {
        self.overlay_events.clear();
        self
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    pub fn running_balance(&self) -> BalanceSeries {
        simulate(&self.params, &self.base_events, &self.overlay_events)
    }

    /// Each day's net movement instead of a running total (interest ignored)
    pub fn daily_changes(&self) -> BalanceSeries {
        let params = self.params.change_only(true);
        simulate(&params, &self.base_events, &self.overlay_events)
    }
}
