//! Calendar feature derivation.
//!
//! Pure functions of a record's date; there are no failure modes once the date
//! has been parsed by ingest.

use chrono::{Datelike, NaiveDate};

use crate::domain::{CalendarFeatures, FeatureRecord, SalesRecord};

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            month_label: date.format("%b").to_string(),
            period_label: date.format("%b %Y").to_string(),
        }
    }
}

/// Attach calendar features to every record, keeping source order.
pub fn derive_features(records: &[SalesRecord]) -> Vec<FeatureRecord> {
    records
        .iter()
        .map(|record| FeatureRecord {
            calendar: CalendarFeatures::from_date(record.date),
            record: record.clone(),
        })
        .collect()
}

/// Short month label for a month index (`1` -> `Jan`).
pub fn month_label(month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(2000, month, 1).map(|d| d.format("%b").to_string())
}
