// src/simulation/engine.rs
// Compounding recurrence engine and the full simulation pipeline

use crate::error::SimulationError;
use crate::simulation::resample::resample_monthly;
use crate::simulation::returns::monthly_returns;
use crate::simulation::types::{
    MonthlyObservation, PricePoint, SimulationRequest, SimulationResult, SimulationStep,
};

/// Run the compounding recurrence over pre-sampled monthly observations.
///
/// The seed step is the head of the observation sequence: `initial_capital`
/// at that observation's date, before any contribution. Every later step is
/// `previous_capital * monthly_return + monthly_contribution`, consuming each
/// observation exactly once in date order. `returns` must be aligned 1:1 with
/// `observations` as produced by [`monthly_returns`].
///
/// Empty observations produce empty steps — the "no data" outcome.
pub fn run_recurrence(
    observations: &[MonthlyObservation],
    returns: &[Option<f64>],
    initial_capital: f64,
    monthly_contribution: f64,
) -> Vec<SimulationStep> {
    let mut steps = Vec::with_capacity(observations.len());
    let Some(seed) = observations.first() else {
        return steps;
    };
    steps.push(SimulationStep {
        date: seed.date,
        capital: initial_capital,
        month_index: 0,
    });

    let mut capital = initial_capital;
    for (i, obs) in observations.iter().enumerate().skip(1) {
        // Aligned returns are Some for every element after the head
        let growth = returns.get(i).copied().flatten().unwrap_or(1.0);
        capital = capital * growth + monthly_contribution;
        steps.push(SimulationStep {
            date: obs.date,
            capital,
            month_index: i as u32,
        });
    }
    steps
}

/// Run one full simulation: resample, compute returns, compound.
///
/// The price series is a read-only snapshot; the call is deterministic and
/// bounded by `years * 12` steps. An empty result (no prices on or after the
/// start date, or a zero-year horizon) is valid, not an error.
pub fn run_simulation(
    series: &[PricePoint],
    request: &SimulationRequest,
) -> Result<SimulationResult, SimulationError> {
    let observations = resample_monthly(series, request.start_date, request.max_months());
    let returns = monthly_returns(&observations)?;
    let steps = run_recurrence(
        &observations,
        &returns,
        request.initial_capital,
        request.monthly_contribution,
    );
    Ok(SimulationResult { steps })
}
