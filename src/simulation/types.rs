// src/simulation/types.rs
// Domain and wire types for the simulation engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Price Series
// ============================================================================

/// A single daily closing price observation.
///
/// The store guarantees `price > 0`, dates ascending, one point per trading
/// day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// The first-trading-day sample for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyObservation {
    pub date: NaiveDate,
    pub price: f64,
}

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Request to run a simulation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// First date eligible for the investment window
    pub start_date: NaiveDate,
    /// Lump sum invested at the seed step; zero is valid
    #[serde(default)]
    pub initial_capital: f64,
    /// Fixed amount added every month; negative values model withdrawals
    #[serde(default)]
    pub monthly_contribution: f64,
    /// Investment horizon in years
    pub years: u32,
}

impl SimulationRequest {
    /// Upper bound of the horizon slider in the UI
    pub const MAX_YEARS: u32 = 50;

    /// Horizon in months. Zero years means a zero-month window (empty
    /// result); values above [`Self::MAX_YEARS`] clamp down to it.
    pub fn max_months(&self) -> usize {
        self.years.min(Self::MAX_YEARS) as usize * 12
    }
}

/// One point on the capital trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    pub date: NaiveDate,
    pub capital: f64,
    pub month_index: u32,
}

/// Ordered capital trajectory for one request.
///
/// Empty steps are the valid "no data" outcome, not an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationResult {
    pub steps: Vec<SimulationStep>,
}

/// Display metrics derived from a finished trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub final_capital: f64,
    pub total_invested: f64,
    pub net_profit: f64,
    /// None when nothing was invested; rendered as "N/A"
    pub profit_pct: Option<f64>,
}

/// Full response for the UI layer
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub steps: Vec<SimulationStep>,
    /// None when `steps` is empty
    pub summary: Option<SimulationSummary>,
}
