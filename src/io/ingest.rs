//! Schema validation and row cleaning.
//!
//! This module turns a `RawTable` into typed records that are safe to fit.
//!
//! - **Strict schema**: every required column is checked before any row work,
//!   and the error names the first missing column.
//! - **Silent row drops**: a row whose date or numeric cells fail coercion is
//!   excluded (never defaulted). Drops are counted, not reported per row.
//! - **Deterministic**: output keeps source row order.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{DATE_COLUMN, PRICE_COLUMN, SalesRecord, UNITS_COLUMN, UnitsRecord};
use crate::error::InsightError;
use crate::io::source::RawTable;

/// Cleaned records plus ingest counters.
#[derive(Debug, Clone)]
pub struct Cleaned<R> {
    pub records: Vec<R>,
    pub rows_read: usize,
}

impl<R> Cleaned<R> {
    pub fn rows_used(&self) -> usize {
        self.records.len()
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.records.len()
    }
}

/// Clean a table into `SalesRecord`s (`Date`, `Units_Sold`, `Price` required).
pub fn clean_sales(table: &RawTable) -> Result<Cleaned<SalesRecord>, InsightError> {
    let [date_idx, units_idx, price_idx] =
        require_columns(table, [DATE_COLUMN, UNITS_COLUMN, PRICE_COLUMN])?;

    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            Some(SalesRecord {
                date: parse_date(cell(row, date_idx)?)?,
                units_sold: parse_number(cell(row, units_idx)?)?,
                price: parse_number(cell(row, price_idx)?)?,
            })
        })
        .collect();

    Ok(finish(table, records))
}

/// Clean a table into `UnitsRecord`s (`Date`, `Units_Sold` required).
pub fn clean_units(table: &RawTable) -> Result<Cleaned<UnitsRecord>, InsightError> {
    let [date_idx, units_idx] = require_columns(table, [DATE_COLUMN, UNITS_COLUMN])?;

    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            Some(UnitsRecord {
                date: parse_date(cell(row, date_idx)?)?,
                units_sold: parse_number(cell(row, units_idx)?)?,
            })
        })
        .collect();

    Ok(finish(table, records))
}

fn finish<R>(table: &RawTable, records: Vec<R>) -> Cleaned<R> {
    let cleaned = Cleaned {
        records,
        rows_read: table.rows_read(),
    };
    tracing::info!(
        rows_read = cleaned.rows_read,
        rows_used = cleaned.rows_used(),
        rows_dropped = cleaned.rows_dropped(),
        "cleaned CSV rows"
    );
    cleaned
}

fn require_columns<const N: usize>(
    table: &RawTable,
    names: [&str; N],
) -> Result<[usize; N], InsightError> {
    let mut out = [0usize; N];
    for (slot, name) in out.iter_mut().zip(names) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| InsightError::SchemaError(name.to_string()))?;
    }
    Ok(out)
}

fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a date cell.
///
/// ISO dates win; ambiguous slash/dash/dot forms are read day-first, and
/// month-first is only tried when day-first cannot produce a valid date.
/// Two-digit years below 70 land in the 2000s, the rest in the 1900s; a
/// four-digit form never yields a year below 100.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 6] = [
        "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%m/%d/%Y",
    ];
    const SHORT_YEAR_FMTS: [&str; 4] = ["%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%m/%d/%y"];
    const DATETIME_FMTS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
    ];

    let s = s.trim();
    DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok().filter(has_full_year))
        .or_else(|| {
            SHORT_YEAR_FMTS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FMTS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
                .filter(has_full_year)
        })
}

fn has_full_year(date: &NaiveDate) -> bool {
    date.year() >= 100
}

/// Parse a numeric cell; non-finite values are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
