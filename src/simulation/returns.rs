// src/simulation/returns.rs
// Month-over-month return calculation

use crate::error::SimulationError;
use crate::simulation::types::MonthlyObservation;

/// Compute month-over-month price ratios, aligned 1:1 with the observations.
///
/// Element 0 is always `None` (no prior month inside the window); element i
/// is `obs[i].price / obs[i-1].price`. A zero, negative, or non-finite price
/// fails the whole computation instead of leaking NaN/Infinity into the
/// capital figures downstream.
pub fn monthly_returns(
    observations: &[MonthlyObservation],
) -> Result<Vec<Option<f64>>, SimulationError> {
    let mut returns = Vec::with_capacity(observations.len());
    for (i, obs) in observations.iter().enumerate() {
        if !(obs.price.is_finite() && obs.price > 0.0) {
            return Err(SimulationError::NonPositivePrice {
                date: obs.date,
                price: obs.price,
            });
        }
        returns.push(match i {
            0 => None,
            _ => Some(obs.price / observations[i - 1].price),
        });
    }
    Ok(returns)
}
