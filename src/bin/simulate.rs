//! One-shot simulation CLI
//!
//! Usage: simulate <store.parquet> <start-date> [initial] [contribution] [years]
//!
//! Prints the step sequence as JSON on stdout and a summary box on stderr,
//! so the JSON stays pipeable.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use dca_simulator::{
    format_currency, format_percent, run_simulation, store, summarize, SimulationRequest,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: simulate <store.parquet> <start-date> [initial] [contribution] [years]");
        process::exit(1);
    }

    let store_path = PathBuf::from(&args[1]);
    let start_date = match NaiveDate::parse_from_str(&args[2], "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            eprintln!("invalid start date '{}': {}", args[2], e);
            process::exit(1);
        }
    };

    let request = SimulationRequest {
        start_date,
        initial_capital: parse_arg(&args, 3, 10_000.0),
        monthly_contribution: parse_arg(&args, 4, 500.0),
        years: parse_arg(&args, 5, 20),
    };

    let series = match store::read_since(&store_path, request.start_date) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("failed to read price store: {}", e);
            process::exit(1);
        }
    };

    let result = match run_simulation(&series, &request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            process::exit(1);
        }
    };

    println!("{}", serde_json::to_string_pretty(&result.steps).unwrap());

    match summarize(&request, &result.steps) {
        Some(summary) => {
            eprintln!("\n───────────────────────────────");
            eprintln!("Months:         {}", result.steps.len());
            eprintln!("Final capital:  {}", format_currency(summary.final_capital));
            eprintln!("Total invested: {}", format_currency(summary.total_invested));
            eprintln!(
                "Net profit:     {} ({})",
                format_currency(summary.net_profit),
                format_percent(summary.profit_pct)
            );
            eprintln!("───────────────────────────────");
        }
        None => eprintln!("no price data in the requested window"),
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|s| s.parse().ok()).unwrap_or(default)
}
