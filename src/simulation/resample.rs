// src/simulation/resample.rs
// Daily -> monthly resampling (first trading day of each month)

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::simulation::types::{MonthlyObservation, PricePoint};

/// Resample a daily price series to one observation per calendar month.
///
/// Filters the input to `date >= start_date`, keeps the earliest-dated point
/// in each (year, month) bucket, orders the buckets ascending, and truncates
/// to the first `max_months` entries. An empty filtered input yields an empty
/// vector, not an error.
///
/// Pure function of its inputs; the output dates are strictly increasing with
/// at most one observation per month.
pub fn resample_monthly(
    series: &[PricePoint],
    start_date: NaiveDate,
    max_months: usize,
) -> Vec<MonthlyObservation> {
    if max_months == 0 {
        return Vec::new();
    }

    // Bucket by (year, month); BTreeMap ordering matches representative-date
    // ordering since each bucket holds exactly one calendar month.
    let mut buckets: BTreeMap<(i32, u32), MonthlyObservation> = BTreeMap::new();
    for point in series.iter().filter(|p| p.date >= start_date) {
        let key = (point.date.year(), point.date.month());
        let candidate = MonthlyObservation {
            date: point.date,
            price: point.price,
        };
        buckets
            .entry(key)
            .and_modify(|obs| {
                if candidate.date < obs.date {
                    *obs = candidate;
                }
            })
            .or_insert(candidate);
    }

    buckets.into_values().take(max_months).collect()
}
