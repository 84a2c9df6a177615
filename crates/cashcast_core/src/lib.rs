//! Cash flow forecasting library
//!
//! This crate projects a cash balance day by day over a fixed window from a
//! set of dated, signed events. It supports:
//! - Calendar-aware recurrence expansion (daily through yearly, semi-monthly)
//! - Daily compounding at an APR with an optional non-interest-bearing floor
//! - What-if overlays ("props") layered on a base plan
//! - Queries over the balance series: first crossing day, worst balances,
//!   milestone timing, runway per scenario
//!
//! The engine performs no I/O. Snapshot types are serde-ready; reading and
//! writing files, formatting, and rendering belong to the caller.
//!
//! ```ignore
//! use cashcast_core::{Cast, config::Window, model::Event, query};
//!
//! let window = Window::new(date(2024, 1, 1), date(2024, 1, 10))?;
//! let cast = Cast::new(window, 100.0)
//!     .add_event(Event::new("paycheck", 50.0, date(2024, 1, 5)));
//!
//! let series = cast.running_balance();
//! assert_eq!(query::first_day_over(&series, 120.0), date(2024, 1, 5));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod cast;
pub mod date_math;
pub mod error;
pub mod market;
pub mod query;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cast::Cast;
pub use config::{CastSnapshot, SimulationParams, Window};
pub use error::{CastError, PriceError};
pub use model::{BalanceSeries, Event, Prop, RepeatInterval};
pub use simulation::simulate;
