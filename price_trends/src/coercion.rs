//! Numeric coercion of normalized records
//!
//! Parsing never fails: text that does not hold a usable number becomes
//! [`Parsed::Missing`] and is dropped later by validation.

use crate::schema::{columns, NormalizedRecord};
use serde::{Deserialize, Serialize};

/// Short hyphen accepted as a range delimiter
const HYPHEN: char = '-';
/// Elongated dash the hyphen is rewritten to before splitting
const EN_DASH: char = '–';

/// Outcome of parsing one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Parsed<T> {
    /// The field held a usable value
    Present(T),
    /// The field was empty, unparseable or out of domain
    Missing,
}

impl<T> Parsed<T> {
    /// The value, if present
    pub fn present(self) -> Option<T> {
        match self {
            Parsed::Present(v) => Some(v),
            Parsed::Missing => None,
        }
    }
}

impl<T> From<Option<T>> for Parsed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Parsed::Present(v),
            None => Parsed::Missing,
        }
    }
}

/// Parse a floating point number. Non-finite values count as missing.
pub fn parse_number(text: &str) -> Parsed<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .into()
}

/// Parse a calendar year written as an integer or an integral float
pub fn parse_year(text: &str) -> Parsed<i32> {
    let text = text.trim();
    if let Ok(year) = text.parse::<i32>() {
        return Parsed::Present(year);
    }

    match parse_number(text) {
        Parsed::Present(v)
            if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) =>
        {
            Parsed::Present(v as i32)
        }
        _ => Parsed::Missing,
    }
}

/// Minimum bound of a unit-count range such as `"3-5"`, `"3–5"` or `"12"`
pub fn parse_unit_range(text: &str) -> Parsed<f64> {
    let unified = text.replace(HYPHEN, &EN_DASH.to_string());
    match unified.split(EN_DASH).next() {
        Some(low) => parse_number(low),
        None => Parsed::Missing,
    }
}

/// A normalized record with its numeric fields parsed
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRecord {
    /// Reporting year
    pub year: Parsed<i32>,
    /// Canonical area label, empty if the field was absent
    pub area: String,
    /// Price per square metre of living area
    pub price_per_m2: Parsed<f64>,
    /// Median transaction price
    pub median_price: Parsed<f64>,
    /// Sum of transaction prices
    pub total_price: Parsed<f64>,
    /// Minimum bound of the unit-count range
    pub num_units_min: Parsed<f64>,
    /// The normalized source fields
    pub source: NormalizedRecord,
}

/// Parse the numeric fields of a normalized record
pub fn coerce(record: NormalizedRecord) -> CoercedRecord {
    let number = |name: &str| record.get(name).map_or(Parsed::Missing, parse_number);

    CoercedRecord {
        year: record.get(columns::YEAR).map_or(Parsed::Missing, parse_year),
        area: record
            .get(columns::DISTRICT)
            .map(|a| a.trim().to_string())
            .unwrap_or_default(),
        price_per_m2: number(columns::PRICE_PER_M2),
        median_price: number(columns::MEDIAN_PRICE),
        total_price: number(columns::TOTAL_PRICE),
        num_units_min: record
            .get(columns::NUM_UNITS)
            .map_or(Parsed::Missing, parse_unit_range),
        source: record,
    }
}
