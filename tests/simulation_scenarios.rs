//! End-to-end simulation scenarios and properties
//!
//! Run with: cargo test --test simulation_scenarios

use approx::{assert_relative_eq, relative_eq};
use chrono::NaiveDate;
use proptest::prelude::*;

use dca_simulator::{
    monthly_returns, resample_monthly, run_simulation, summarize, PricePoint, SimulationRequest,
};

/// Relative tolerance for capital figures
const TOLERANCE: f64 = 1e-9;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn point(y: i32, m: u32, d: u32, price: f64) -> PricePoint {
    PricePoint {
        date: date(y, m, d),
        price,
    }
}

fn request(start: NaiveDate, initial: f64, contribution: f64, years: u32) -> SimulationRequest {
    SimulationRequest {
        start_date: start,
        initial_capital: initial,
        monthly_contribution: contribution,
        years,
    }
}

// ============================================================================
// Scenario fixtures
// ============================================================================

#[test]
fn lump_sum_compounds_without_contributions() {
    let series = vec![
        point(2020, 1, 2, 100.0),
        point(2020, 2, 3, 110.0),
        point(2020, 3, 2, 121.0),
    ];
    let result = run_simulation(&series, &request(date(2020, 1, 1), 1000.0, 0.0, 1)).unwrap();

    let capitals: Vec<f64> = result.steps.iter().map(|s| s.capital).collect();
    assert_eq!(result.steps.len(), 3);
    assert_relative_eq!(capitals[0], 1000.0, max_relative = TOLERANCE);
    assert_relative_eq!(capitals[1], 1100.0, max_relative = TOLERANCE);
    assert_relative_eq!(capitals[2], 1210.0, max_relative = TOLERANCE);
}

#[test]
fn contributions_compound_from_zero() {
    let series = vec![
        point(2020, 1, 2, 100.0),
        point(2020, 2, 3, 110.0),
        point(2020, 3, 2, 121.0),
    ];
    let result = run_simulation(&series, &request(date(2020, 1, 1), 0.0, 100.0, 1)).unwrap();

    let capitals: Vec<f64> = result.steps.iter().map(|s| s.capital).collect();
    assert_relative_eq!(capitals[0], 0.0, epsilon = TOLERANCE);
    assert_relative_eq!(capitals[1], 100.0, max_relative = TOLERANCE);
    assert_relative_eq!(capitals[2], 210.0, max_relative = TOLERANCE);
}

#[test]
fn daily_series_samples_the_first_trading_day() {
    // Three trading days per month; only the first of each month counts
    let series = vec![
        point(2020, 1, 2, 100.0),
        point(2020, 1, 15, 500.0),
        point(2020, 1, 30, 700.0),
        point(2020, 2, 3, 110.0),
        point(2020, 2, 14, 900.0),
        point(2020, 3, 2, 121.0),
    ];
    let result = run_simulation(&series, &request(date(2020, 1, 1), 1000.0, 0.0, 1)).unwrap();

    let dates: Vec<NaiveDate> = result.steps.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2020, 1, 2), date(2020, 2, 3), date(2020, 3, 2)]);
    assert_relative_eq!(result.steps[2].capital, 1210.0, max_relative = TOLERANCE);
}

#[test]
fn single_point_window_is_just_the_seed() {
    let series = vec![point(2020, 6, 1, 250.0)];
    let result = run_simulation(&series, &request(date(2020, 1, 1), 5000.0, 500.0, 10)).unwrap();

    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.steps[0].capital, 5000.0);
    assert_eq!(result.steps[0].month_index, 0);
}

#[test]
fn empty_store_gives_empty_result() {
    let result = run_simulation(&[], &request(date(2020, 1, 1), 1000.0, 100.0, 10)).unwrap();
    assert!(result.steps.is_empty());
    assert!(summarize(&request(date(2020, 1, 1), 1000.0, 100.0, 10), &result.steps).is_none());
}

#[test]
fn start_after_last_price_gives_empty_result() {
    let series = vec![point(2020, 1, 2, 100.0), point(2020, 2, 3, 110.0)];
    let result = run_simulation(&series, &request(date(2030, 1, 1), 1000.0, 100.0, 10)).unwrap();
    assert!(result.steps.is_empty());
}

#[test]
fn horizon_truncates_the_observation_window() {
    // Five years of monthly data, two-year horizon: exactly 24 steps
    let series: Vec<PricePoint> = (0..60)
        .map(|i| point(2015 + i / 12, (i % 12) as u32 + 1, 1, 100.0 + i as f64))
        .collect();
    let result = run_simulation(&series, &request(date(2015, 1, 1), 1000.0, 0.0, 2)).unwrap();

    assert_eq!(result.steps.len(), 24);
    assert_eq!(result.steps.last().unwrap().date, date(2016, 12, 1));
}

#[test]
fn summary_derives_the_display_metrics() {
    let series = vec![
        point(2020, 1, 2, 100.0),
        point(2020, 2, 3, 110.0),
        point(2020, 3, 2, 121.0),
    ];
    let req = request(date(2020, 1, 1), 1000.0, 100.0, 1);
    let result = run_simulation(&series, &req).unwrap();
    let summary = summarize(&req, &result.steps).unwrap();

    // capital: 1000 -> 1000*1.1+100 = 1200 -> 1200*1.1+100 = 1420
    assert_relative_eq!(summary.final_capital, 1420.0, max_relative = TOLERANCE);
    // seed + two contributions
    assert_relative_eq!(summary.total_invested, 1200.0, max_relative = TOLERANCE);
    assert_relative_eq!(summary.net_profit, 220.0, max_relative = TOLERANCE);
    assert_relative_eq!(
        summary.profit_pct.unwrap(),
        220.0 / 1200.0 * 100.0,
        max_relative = TOLERANCE
    );
}

// ============================================================================
// Properties
// ============================================================================

/// Random monthly series: first-of-month points with positive prices
fn monthly_series(max_months: usize) -> impl Strategy<Value = Vec<PricePoint>> {
    (1980..2010i32, 1usize..=max_months).prop_flat_map(|(start_year, months)| {
        proptest::collection::vec(1.0f64..1000.0, months).prop_map(move |prices| {
            prices
                .into_iter()
                .enumerate()
                .map(|(i, price)| PricePoint {
                    date: NaiveDate::from_ymd_opt(start_year + (i / 12) as i32, (i % 12) as u32 + 1, 1)
                        .unwrap(),
                    price,
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn seed_capital_is_exactly_the_initial_amount(
        series in monthly_series(120),
        initial in 0.0f64..1e6,
        contribution in -1000.0f64..1000.0,
    ) {
        let req = request(series[0].date, initial, contribution, 50);
        let result = run_simulation(&series, &req).unwrap();
        prop_assert_eq!(result.steps[0].capital, initial);
    }

    #[test]
    fn dates_increase_and_month_index_counts(series in monthly_series(120)) {
        let req = request(series[0].date, 1000.0, 100.0, 50);
        let result = run_simulation(&series, &req).unwrap();

        for (i, step) in result.steps.iter().enumerate() {
            prop_assert_eq!(step.month_index as usize, i);
        }
        for pair in result.steps.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn recurrence_law_holds(
        series in monthly_series(120),
        initial in 0.0f64..1e6,
        contribution in -1000.0f64..1000.0,
    ) {
        let req = request(series[0].date, initial, contribution, 50);
        let observations = resample_monthly(&series, req.start_date, req.max_months());
        let returns = monthly_returns(&observations).unwrap();
        let result = run_simulation(&series, &req).unwrap();

        prop_assert_eq!(result.steps.len(), observations.len());
        for i in 1..result.steps.len() {
            let expected = result.steps[i - 1].capital * returns[i].unwrap() + contribution;
            prop_assert!(
                relative_eq!(result.steps[i].capital, expected, max_relative = TOLERANCE),
                "step {}: {} != {}", i, result.steps[i].capital, expected
            );
        }
    }

    #[test]
    fn resampling_an_already_monthly_series_is_identity(series in monthly_series(120)) {
        let observations = resample_monthly(&series, series[0].date, series.len());
        prop_assert_eq!(observations.len(), series.len());
        for (obs, p) in observations.iter().zip(&series) {
            prop_assert_eq!(obs.date, p.date);
            prop_assert_eq!(obs.price, p.price);
        }
    }
}
