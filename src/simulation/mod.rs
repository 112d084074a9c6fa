// src/simulation/mod.rs
// Monthly dollar-cost-averaging simulation engine

pub mod engine;
pub mod metrics;
pub mod resample;
pub mod returns;
pub mod types;

// Re-export main types and functions
pub use engine::{run_recurrence, run_simulation};
pub use metrics::{format_currency, format_percent, summarize};
pub use resample::resample_monthly;
pub use returns::monthly_returns;
pub use types::*;
