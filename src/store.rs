//! Parquet-backed price series store.
//!
//! One file, two columns: `date` (utf8 `YYYY-MM-DD`) and `price` (f64), one
//! row per trading day, sorted ascending. The ingest binary replaces the file
//! wholesale by writing a sibling temp file and renaming it into place, so a
//! concurrent reader sees either the old contents or the new ones, never a
//! partial file.

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Float64Array, StringArray};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use crate::simulation::types::PricePoint;

pub const DATE_COLUMN: &str = "date";
pub const PRICE_COLUMN: &str = "price";

/// Failure reading the price store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open price store: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read price store: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("failed to decode price store batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("price store schema mismatch: {0}")]
    Schema(String),
    #[error("invalid row in price store: {0}")]
    InvalidRow(String),
}

/// Read all price points with `date >= start_date`, ascending by date.
///
/// The file handle lives only for the duration of the read. Rows with null
/// cells are skipped; an unparseable date or a non-positive price fails the
/// whole read. Duplicate dates collapse to their first occurrence.
pub fn read_since(path: &Path, start_date: NaiveDate) -> Result<Vec<PricePoint>, StoreError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut points: Vec<PricePoint> = Vec::new();
    for batch in reader {
        let batch = batch?;
        let dates = batch
            .column_by_name(DATE_COLUMN)
            .and_then(|col| col.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| StoreError::Schema(format!("missing utf8 column '{}'", DATE_COLUMN)))?;
        let prices = batch
            .column_by_name(PRICE_COLUMN)
            .and_then(|col| col.as_any().downcast_ref::<Float64Array>())
            .ok_or_else(|| StoreError::Schema(format!("missing f64 column '{}'", PRICE_COLUMN)))?;

        for i in 0..batch.num_rows() {
            if dates.is_null(i) || prices.is_null(i) {
                continue;
            }
            let raw = dates.value(i);
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| StoreError::InvalidRow(format!("unparseable date '{}': {}", raw, e)))?;
            let price = prices.value(i);
            if !(price.is_finite() && price > 0.0) {
                return Err(StoreError::InvalidRow(format!(
                    "non-positive price {} on {}",
                    price, date
                )));
            }
            if date >= start_date {
                points.push(PricePoint { date, price });
            }
        }
    }

    // Ingest writes the file sorted and duplicate-free; the read contract is
    // ascending, one point per day, either way.
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);

    tracing::debug!(rows = points.len(), since = %start_date, "price store read");
    Ok(points)
}
