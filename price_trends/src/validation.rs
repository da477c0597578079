//! Record filtering
//!
//! Only records with positive prices and a unit count of at least
//! [`MIN_UNITS`] become [`CleanRecord`]s. Small-sample aggregates are
//! statistically unstable. Rejected records are dropped, never reported as
//! errors.

use crate::coercion::{CoercedRecord, Parsed};
use crate::schema::NormalizedRecord;
use serde::Serialize;
use std::fmt;

/// Smallest unit count a record must report to be kept
pub const MIN_UNITS: f64 = 3.0;

/// Why a record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rejection {
    /// Year could not be parsed
    MissingYear,
    /// Median price missing or not positive
    MedianPrice,
    /// Price per square metre missing or not positive
    PricePerM2,
    /// Total price missing or not positive
    TotalPrice,
    /// Unit count missing or below [`MIN_UNITS`]
    TooFewUnits,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::MissingYear => "missing year",
            Rejection::MedianPrice => "median price missing or not positive",
            Rejection::PricePerM2 => "price per m² missing or not positive",
            Rejection::TotalPrice => "total price missing or not positive",
            Rejection::TooFewUnits => "unit count missing or below minimum",
        };
        write!(f, "{}", reason)
    }
}

/// A validated transaction record
///
/// Invariant: all three prices are finite and strictly positive and
/// `num_units_min >= MIN_UNITS`. The area label may be empty; such records
/// only count toward the citywide scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    year: i32,
    area: String,
    price_per_m2: f64,
    median_price: f64,
    total_price: f64,
    num_units_min: f64,
    #[serde(skip)]
    source: NormalizedRecord,
}

impl CleanRecord {
    /// Create a record from already parsed values, checking the invariant
    pub fn new(
        year: i32,
        area: impl Into<String>,
        price_per_m2: f64,
        median_price: f64,
        total_price: f64,
        num_units_min: f64,
    ) -> std::result::Result<Self, Rejection> {
        validate(CoercedRecord {
            year: Parsed::Present(year),
            area: area.into(),
            price_per_m2: Parsed::Present(price_per_m2),
            median_price: Parsed::Present(median_price),
            total_price: Parsed::Present(total_price),
            num_units_min: Parsed::Present(num_units_min),
            source: NormalizedRecord::default(),
        })
    }

    /// Reporting year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Canonical area label
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Price per square metre of living area
    pub fn price_per_m2(&self) -> f64 {
        self.price_per_m2
    }

    /// Median transaction price
    pub fn median_price(&self) -> f64 {
        self.median_price
    }

    /// Sum of transaction prices
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Minimum bound of the reported unit-count range
    pub fn num_units_min(&self) -> f64 {
        self.num_units_min
    }

    /// Normalized source fields the record was built from
    pub fn source(&self) -> &NormalizedRecord {
        &self.source
    }
}

fn positive(value: Parsed<f64>, rejection: Rejection) -> std::result::Result<f64, Rejection> {
    match value {
        Parsed::Present(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(rejection),
    }
}

/// Keep a coerced record if it satisfies every condition
pub fn validate(record: CoercedRecord) -> std::result::Result<CleanRecord, Rejection> {
    let year = record.year.present().ok_or(Rejection::MissingYear)?;

    let median_price = positive(record.median_price, Rejection::MedianPrice)?;
    let price_per_m2 = positive(record.price_per_m2, Rejection::PricePerM2)?;
    let total_price = positive(record.total_price, Rejection::TotalPrice)?;

    let num_units_min = match record.num_units_min {
        Parsed::Present(units) if units >= MIN_UNITS => units,
        _ => return Err(Rejection::TooFewUnits),
    };

    Ok(CleanRecord {
        year,
        area: record.area,
        price_per_m2,
        median_price,
        total_price,
        num_units_min,
        source: record.source,
    })
}

/// Split records into kept and rejected
pub fn filter_records<I>(records: I) -> (Vec<CleanRecord>, Vec<Rejection>)
where
    I: IntoIterator<Item = CoercedRecord>,
{
    let mut kept = Vec::new();
    let mut rejected = Vec::new();

    for record in records {
        match validate(record) {
            Ok(clean) => kept.push(clean),
            Err(reason) => {
                log::debug!("Dropping record: {}", reason);
                rejected.push(reason);
            }
        }
    }

    (kept, rejected)
}
