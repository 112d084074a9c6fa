// src/simulation/metrics.rs
// Display metrics derived from a finished trajectory

use crate::simulation::types::{SimulationRequest, SimulationStep, SimulationSummary};

/// Derive the display metrics from a finished step sequence.
///
/// Returns `None` for an empty run — the caller renders "no data". Total
/// invested counts one contribution per step after the seed; the profit
/// percentage is `None` when total invested is zero.
pub fn summarize(request: &SimulationRequest, steps: &[SimulationStep]) -> Option<SimulationSummary> {
    let last = steps.last()?;
    let contributions = steps.len().saturating_sub(1) as f64;
    let total_invested = request.initial_capital + request.monthly_contribution * contributions;
    let net_profit = last.capital - total_invested;
    let profit_pct = if total_invested != 0.0 {
        Some(net_profit / total_invested * 100.0)
    } else {
        None
    };

    Some(SimulationSummary {
        final_capital: last.capital,
        total_invested,
        net_profit,
        profit_pct,
    })
}

/// Format a capital figure as dollars with thousands separators.
///
/// Rounding to cents happens here and only here; accumulation stays in full
/// f64 precision.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{:02}", grouped, frac)
    } else {
        format!("${}.{:02}", grouped, frac)
    }
}

/// Format a guarded profit percentage; `None` renders as "N/A".
pub fn format_percent(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:.1}%", p),
        None => "N/A".to_string(),
    }
}
