//! Command-line front end for the cashcast forecasting engine
//!
//! Reads YAML plans, stores snapshots under the data directory and renders
//! forecasts as plain-text tables.

pub mod config;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

pub use config::{PlanError, PlanFile};
pub use data::{DataDirectory, StorageError};
pub use logging::init_logging;
