//! Yearly aggregation of price observations

use crate::validation::CleanRecord;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Mean price per square metre observed in one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar year
    pub year: i32,
    /// Arithmetic mean of `price_per_m2` over the year's records
    pub mean_price_per_m2: f64,
}

/// Group records by year and average their price per square metre
///
/// Property type and market segment distinctions within a year are
/// collapsed. The result is sorted by year; an empty input gives an empty
/// series.
pub fn aggregate_by_year<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a CleanRecord>,
{
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_year
            .entry(record.year())
            .or_default()
            .push(record.price_per_m2());
    }

    by_year
        .into_iter()
        .map(|(year, prices)| TrendPoint {
            year,
            mean_price_per_m2: prices.iter().mean(),
        })
        .collect()
}
