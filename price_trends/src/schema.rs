//! Field name normalization for raw transaction records
//!
//! The source dataset uses German column names. A [`SchemaMapping`] renames
//! them to canonical English names and rewrites the dataset's whole-city
//! area label to the canonical citywide label.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical column names
pub mod columns {
    pub const YEAR: &str = "year";
    pub const DATA_STATUS_CODE: &str = "data_status_code";
    pub const PROPERTY_TYPE_SORT: &str = "property_type_sort";
    pub const PROPERTY_TYPE_CODE: &str = "property_type_code";
    pub const PROPERTY_TYPE: &str = "property_type";
    pub const MARKET_SEGMENT_SORT: &str = "market_segment_sort";
    pub const MARKET_SEGMENT_CODE: &str = "market_segment_code";
    pub const MARKET_SEGMENT: &str = "market_segment";
    pub const DISTRICT_SORT: &str = "district_sort";
    pub const DISTRICT_CODE: &str = "district_code";
    pub const DISTRICT: &str = "district";
    pub const NUM_UNITS: &str = "num_units";
    pub const PRICE_PER_M2: &str = "price_per_m2";
    pub const MEDIAN_PRICE: &str = "median_price";
    pub const TOTAL_PRICE: &str = "total_price";

    /// Derived minimum bound of the unit-count range, appended on output
    pub const NUM_UNITS_CLEAN: &str = "num_units_clean";
}

/// Every canonical name a complete mapping must produce
pub const CANONICAL_FIELDS: [&str; 15] = [
    columns::YEAR,
    columns::DATA_STATUS_CODE,
    columns::PROPERTY_TYPE_SORT,
    columns::PROPERTY_TYPE_CODE,
    columns::PROPERTY_TYPE,
    columns::MARKET_SEGMENT_SORT,
    columns::MARKET_SEGMENT_CODE,
    columns::MARKET_SEGMENT,
    columns::DISTRICT_SORT,
    columns::DISTRICT_CODE,
    columns::DISTRICT,
    columns::NUM_UNITS,
    columns::PRICE_PER_M2,
    columns::MEDIAN_PRICE,
    columns::TOTAL_PRICE,
];

/// One source-to-canonical rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Column name as it appears in the raw file
    pub source: String,
    /// Canonical column name
    pub canonical: String,
}

/// Rename table plus the citywide label rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMapping {
    /// Area label the raw dataset uses for the whole city
    pub citywide_source: String,
    /// Canonical label the whole-city rows are rewritten to
    pub citywide_label: String,
    /// Ordered rename table
    pub fields: Vec<FieldMapping>,
}

impl SchemaMapping {
    /// Check that the table is total over [`CANONICAL_FIELDS`] and injective
    pub fn validate(&self) -> Result<()> {
        let mut sources = HashSet::new();
        let mut canonicals = HashSet::new();

        for field in &self.fields {
            if !sources.insert(field.source.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "Source field '{}' is mapped more than once",
                    field.source
                )));
            }
            if !canonicals.insert(field.canonical.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "Canonical field '{}' is the target of more than one source field",
                    field.canonical
                )));
            }
        }

        let missing: Vec<&str> = CANONICAL_FIELDS
            .iter()
            .copied()
            .filter(|name| !canonicals.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(ForecastError::ConfigError(format!(
                "Schema mapping does not cover: {}",
                missing.join(", ")
            )));
        }

        if self.fields.len() != CANONICAL_FIELDS.len() {
            return Err(ForecastError::ConfigError(format!(
                "Schema mapping has {} entries, expected {}",
                self.fields.len(),
                CANONICAL_FIELDS.len()
            )));
        }

        Ok(())
    }

    /// Canonical name for a raw field name, if the table maps it
    pub fn canonical_name(&self, source: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.source == source)
            .map(|f| f.canonical.as_str())
    }

    /// Rename a header row. Unmapped names pass through unchanged.
    pub fn normalize_headers<'a, I>(&self, headers: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        headers
            .into_iter()
            .map(|h| self.canonical_name(h).unwrap_or(h).to_string())
            .collect()
    }

    /// Raw source names from the table that are absent in `headers`
    pub fn missing_source_headers<'a, I>(&self, headers: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: HashSet<&str> = headers.into_iter().collect();
        self.fields
            .iter()
            .filter(|f| !present.contains(f.source.as_str()))
            .map(|f| f.source.clone())
            .collect()
    }

    /// Rename a record's fields and rewrite the citywide area label
    pub fn normalize(&self, raw: RawRecord) -> NormalizedRecord {
        let fields = raw
            .fields
            .into_iter()
            .map(|(name, value)| {
                let name = self.canonical_name(&name).map(str::to_string).unwrap_or(name);
                let value = if name == columns::DISTRICT && value == self.citywide_source {
                    self.citywide_label.clone()
                } else {
                    value
                };
                (name, value)
            })
            .collect();

        NormalizedRecord { fields }
    }
}

/// One row of the raw dataset, keyed by its source column names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Create a record from ordered `(name, value)` pairs
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Pair a CSV row with its header row
    pub fn from_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> Self {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A record keyed by canonical field names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    fields: Vec<(String, String)>,
}

impl NormalizedRecord {
    /// Value of the named field
    pub fn get(&self, name: &str) -> Option<&str> {
        lookup(&self.fields, name)
    }

    /// Build a record from fields that already carry canonical names
    pub(crate) fn from_canonical(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }
}

fn lookup<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}
