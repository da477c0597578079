//! Clean dataset construction and tabular I/O
//!
//! Ingestion runs the raw file through normalization, coercion and
//! validation in one batch pass. Structural problems (unreadable CSV,
//! missing columns) abort the pass; no partial dataset is returned.

use crate::coercion::{coerce, parse_number, CoercedRecord};
use crate::error::{ForecastError, Result};
use crate::schema::{columns, NormalizedRecord, RawRecord, SchemaMapping, CANONICAL_FIELDS};
use crate::validation::{filter_records, CleanRecord, Rejection};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Columns a clean file must provide to be loaded again
const CLEAN_REQUIRED: [&str; 6] = [
    columns::YEAR,
    columns::DISTRICT,
    columns::PRICE_PER_M2,
    columns::MEDIAN_PRICE,
    columns::TOTAL_PRICE,
    columns::NUM_UNITS_CLEAN,
];

/// Immutable set of validated records
#[derive(Debug, Clone, Default)]
pub struct CleanDataset {
    /// Canonical column order used when writing, without `num_units_clean`
    columns: Vec<String>,
    records: Vec<CleanRecord>,
}

/// Counts collected during an ingestion pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    /// Data rows read from the input
    pub rows_read: usize,
    /// Rows that passed validation
    pub rows_kept: usize,
    /// Dropped rows per reason
    pub rejected: BTreeMap<Rejection, usize>,
}

impl IngestionSummary {
    fn record(rows_read: usize, rows_kept: usize, rejections: &[Rejection]) -> Self {
        let mut rejected = BTreeMap::new();
        for reason in rejections {
            *rejected.entry(*reason).or_insert(0) += 1;
        }
        Self {
            rows_read,
            rows_kept,
            rejected,
        }
    }

    /// Number of rows that were dropped
    pub fn rows_dropped(&self) -> usize {
        self.rejected.values().sum()
    }
}

impl fmt::Display for IngestionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} kept, {} dropped",
            self.rows_read,
            self.rows_kept,
            self.rows_dropped()
        )?;
        for (reason, count) in &self.rejected {
            write!(f, "; {}: {}", reason, count)?;
        }
        Ok(())
    }
}

impl CleanDataset {
    /// Build a dataset from records that already passed validation
    pub fn from_records(records: Vec<CleanRecord>) -> Self {
        let columns = CANONICAL_FIELDS.iter().map(|c| c.to_string()).collect();
        Self { columns, records }
    }

    /// Ingest a raw CSV file
    pub fn ingest_csv<P: AsRef<Path>>(
        path: P,
        mapping: &SchemaMapping,
    ) -> Result<(Self, IngestionSummary)> {
        let file = File::open(path)?;
        Self::ingest_reader(file, mapping)
    }

    /// Ingest raw CSV text from any reader
    pub fn ingest_reader<R: Read>(
        reader: R,
        mapping: &SchemaMapping,
    ) -> Result<(Self, IngestionSummary)> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let missing = mapping.missing_source_headers(headers.iter());
        if !missing.is_empty() {
            return Err(ForecastError::SchemaMismatch { missing });
        }
        let column_order = mapping.normalize_headers(headers.iter());

        let mut coerced = Vec::new();
        for row in reader.records() {
            let row = row?;
            let raw = RawRecord::from_row(&headers, &row);
            coerced.push(coerce(mapping.normalize(raw)));
        }

        let rows_read = coerced.len();
        let (records, rejections) = filter_records(coerced);
        let summary = IngestionSummary::record(rows_read, records.len(), &rejections);
        log::info!("Ingestion finished: {}", summary);

        Ok((
            Self {
                columns: column_order,
                records,
            },
            summary,
        ))
    }

    /// Load a file previously written by [`CleanDataset::write_csv`]
    pub fn from_clean_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_clean_reader(file)
    }

    /// Load clean CSV text from any reader. Rows are validated again.
    pub fn from_clean_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let missing: Vec<String> = CLEAN_REQUIRED
            .iter()
            .filter(|name| !headers.iter().any(|h| h == **name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ForecastError::SchemaMismatch { missing });
        }

        let column_order: Vec<String> = headers
            .iter()
            .filter(|h| *h != columns::NUM_UNITS_CLEAN)
            .map(str::to_string)
            .collect();

        let mut coerced = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut units_clean = None;
            let mut fields = Vec::with_capacity(column_order.len());
            for (name, value) in headers.iter().zip(row.iter()) {
                if name == columns::NUM_UNITS_CLEAN {
                    units_clean = Some(value);
                } else {
                    fields.push((name.to_string(), value.to_string()));
                }
            }

            let units_clean = units_clean.map(parse_number);
            let mut record: CoercedRecord = coerce(NormalizedRecord::from_canonical(fields));
            if let Some(units) = units_clean {
                record.num_units_min = units;
            }
            coerced.push(record);
        }

        let rows_read = coerced.len();
        let (records, rejections) = filter_records(coerced);
        if !rejections.is_empty() {
            log::warn!(
                "{} of {} rows in clean file failed validation and were dropped",
                rejections.len(),
                rows_read
            );
        }

        Ok(Self {
            columns: column_order,
            records,
        })
    }

    /// Write the dataset as CSV with canonical headers
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the dataset as CSV to any writer
    ///
    /// Numeric columns are written from their parsed values, other columns
    /// from the source text. `num_units_clean` is appended last.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        header.push(columns::NUM_UNITS_CLEAN);
        writer.write_record(&header)?;

        for record in &self.records {
            let mut row: Vec<String> = self
                .columns
                .iter()
                .map(|name| match name.as_str() {
                    columns::YEAR => record.year().to_string(),
                    columns::DISTRICT => record.area().to_string(),
                    columns::PRICE_PER_M2 => record.price_per_m2().to_string(),
                    columns::MEDIAN_PRICE => record.median_price().to_string(),
                    columns::TOTAL_PRICE => record.total_price().to_string(),
                    other => record.source().get(other).unwrap_or_default().to_string(),
                })
                .collect();
            row.push(record.num_units_min().to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// All records
    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    /// Column order used when writing
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Distinct area labels that occur in the data
    pub fn areas(&self) -> BTreeSet<&str> {
        self.records.iter().map(CleanRecord::area).collect()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
