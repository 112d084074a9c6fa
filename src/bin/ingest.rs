//! CSV to parquet price-store builder
//!
//! Usage: ingest <prices.csv> <store.parquet>
//!
//! The CSV needs a date column and a price column (header names matched
//! case-insensitively; `close` and `adj close` are accepted for price, the
//! shape market-data exports usually have). The store is replaced
//! atomically: the new parquet is written next to it and renamed over the
//! old one, so a failed run leaves the previous store intact.

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dca_simulator::store::{DATE_COLUMN, PRICE_COLUMN};
use dca_simulator::PricePoint;

const DATE_HEADERS: [&str; 1] = ["date"];
const PRICE_HEADERS: [&str; 3] = ["price", "close", "adj close"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: ingest <prices.csv> <store.parquet>");
        process::exit(1);
    }

    let csv_path = PathBuf::from(&args[1]);
    let store_path = PathBuf::from(&args[2]);

    if let Err(e) = run(&csv_path, &store_path) {
        eprintln!("ingest failed: {}", e);
        eprintln!("the existing store (if any) was left untouched");
        process::exit(1);
    }
}

fn run(csv_path: &Path, store_path: &Path) -> Result<(), Box<dyn Error>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.to_path_buf()))?
        .finish()?;

    let date_name = resolve_column(&df, &DATE_HEADERS)
        .ok_or_else(|| format!("no date column in {}", csv_path.display()))?;
    let price_name = resolve_column(&df, &PRICE_HEADERS)
        .ok_or_else(|| format!("no price/close column in {}", csv_path.display()))?;
    info!(
        date = %date_name, price = %price_name, rows = df.height(),
        "parsed {}", csv_path.display()
    );

    let date_col = df.column(&date_name)?.cast(&DataType::String)?;
    let dates = date_col.as_materialized_series().str()?;
    let price_col = df.column(&price_name)?.cast(&DataType::Float64)?;
    let prices = price_col.as_materialized_series().f64()?;

    let mut points: Vec<PricePoint> = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (raw_date, price) in dates.into_iter().zip(prices.into_iter()) {
        let (Some(raw_date), Some(price)) = (raw_date, price) else {
            dropped += 1;
            continue;
        };
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("unparseable date '{}': {}", raw_date, e))?;
        if !(price.is_finite() && price > 0.0) {
            return Err(format!(
                "non-positive price {} on {}; refusing to build the store",
                price, date
            )
            .into());
        }
        points.push(PricePoint { date, price });
    }
    if dropped > 0 {
        warn!(rows = dropped, "dropped rows with missing values");
    }
    if points.is_empty() {
        return Err("no usable rows in the CSV".into());
    }

    // Stable sort, then collapse duplicate dates to their first row
    points.sort_by_key(|p| p.date);
    let before = points.len();
    points.dedup_by_key(|p| p.date);
    if points.len() < before {
        warn!(rows = before - points.len(), "collapsed duplicate dates");
    }

    write_store(store_path, &points)?;
    info!(
        rows = points.len(),
        from = %points.first().map(|p| p.date.to_string()).unwrap_or_default(),
        to = %points.last().map(|p| p.date.to_string()).unwrap_or_default(),
        "price store replaced: {}", store_path.display()
    );
    Ok(())
}

/// First dataframe column whose header matches one of the candidates
fn resolve_column(df: &DataFrame, candidates: &[&str]) -> Option<String> {
    df.get_column_names()
        .iter()
        .find(|name| candidates.iter().any(|c| name.as_str().eq_ignore_ascii_case(c)))
        .map(|name| name.to_string())
}

/// Write the validated series to a temp file, then rename over the store
fn write_store(store_path: &Path, points: &[PricePoint]) -> Result<(), Box<dyn Error>> {
    let dates: Vec<String> = points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect();
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let mut df = DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), dates),
        Column::new(PRICE_COLUMN.into(), prices),
    ])?;

    let tmp_path = tmp_path(store_path);
    let file = File::create(&tmp_path)?;
    ParquetWriter::new(file).finish(&mut df)?;
    std::fs::rename(&tmp_path, store_path)?;
    Ok(())
}

fn tmp_path(store_path: &Path) -> PathBuf {
    let mut name = store_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store.parquet".into());
    name.push(".tmp");
    store_path.with_file_name(name)
}
