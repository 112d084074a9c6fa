//! # DCA Simulator
//!
//! Simulates a recurring (dollar-cost-averaging) investment strategy against
//! historical S&P 500 closing prices.
//!
//! ## Pipeline
//! - Resample the daily price series to one observation per calendar month
//!   (first trading day)
//! - Compute month-over-month returns
//! - Run the compounding recurrence: each month's capital is the prior
//!   month's capital times the realized return, plus a fixed contribution
//!
//! ## Example
//! ```
//! use dca_simulator::{run_simulation, PricePoint, SimulationRequest};
//! use chrono::NaiveDate;
//!
//! let series = vec![
//!     PricePoint { date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), price: 100.0 },
//!     PricePoint { date: NaiveDate::from_ymd_opt(2020, 2, 3).unwrap(), price: 110.0 },
//! ];
//! let request = SimulationRequest {
//!     start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     initial_capital: 1_000.0,
//!     monthly_contribution: 100.0,
//!     years: 1,
//! };
//! let result = run_simulation(&series, &request).unwrap();
//! assert_eq!(result.steps.len(), 2);
//! assert_eq!(result.steps[0].capital, 1_000.0);
//! ```

pub mod error;
pub mod simulation;
pub mod store;

// Re-export the main types and functions at crate root
pub use error::SimulationError;
pub use simulation::engine::{run_recurrence, run_simulation};
pub use simulation::metrics::{format_currency, format_percent, summarize};
pub use simulation::resample::resample_monthly;
pub use simulation::returns::monthly_returns;
pub use simulation::types::{
    MonthlyObservation, PricePoint, SimulationRequest, SimulationResponse, SimulationResult,
    SimulationStep, SimulationSummary,
};
pub use store::{read_since, StoreError};
