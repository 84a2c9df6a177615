//! Integration tests for the cashcast engine
//!
//! Tests are organized by topic:
//! - `basic` - The daily walk without interest
//! - `recurrence` - Recurring event expansion
//! - `compounding` - APR and the min-cash floor
//! - `overlays` - Prop activation and composition
//! - `queries` - Searches over a balance series
//! - `milestones` - Milestone table
//! - `scenarios` - Scenario comparison, runway, breakdowns
//! - `snapshot` - Persisted snapshot form

mod basic;
mod queries;
mod scenarios;
