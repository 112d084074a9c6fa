// src/error.rs
// Typed failures for one simulation run

use chrono::NaiveDate;
use thiserror::Error;

/// Failure inside one simulation run.
///
/// A window with no data in it is not an error; it produces an empty result
/// the caller renders as "no data".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A non-positive price reached the return calculator. Ingestion rejects
    /// such rows, so this indicates a corrupt or hand-edited store file.
    #[error("non-positive price {price} on {date}; cannot compute a monthly return")]
    NonPositivePrice { date: NaiveDate, price: f64 },
}
