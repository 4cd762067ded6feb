//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once per request by the ingest stage
//! - handed by reference to the fitters and aggregators
//! - dropped at the end of the request (nothing here is cached)

use chrono::NaiveDate;
use clap::ValueEnum;

/// Required column holding the observation date.
pub const DATE_COLUMN: &str = "Date";
/// Required column holding units sold.
pub const UNITS_COLUMN: &str = "Units_Sold";
/// Column holding unit price (required for pricing views).
pub const PRICE_COLUMN: &str = "Price";

/// Default number of forecast periods.
pub const DEFAULT_FORECAST_MONTHS: usize = 3;
/// Longest forecast horizon accepted (ten years of month-ends).
pub const MAX_FORECAST_MONTHS: usize = 120;
/// Default `units` used by the pricing prediction.
pub const DEFAULT_PRICING_UNITS: f64 = 120.0;
/// Default `month` used by the pricing prediction.
pub const DEFAULT_PRICING_MONTH: i32 = 6;

/// A cleaned sales row with all three fields well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub units_sold: f64,
    pub price: f64,
}

/// A cleaned row for forecasting, where price is not required.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitsRecord {
    pub date: NaiveDate,
    pub units_sold: f64,
}

/// Calendar features derived from a record's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// Month index, 1–12.
    pub month: u32,
    /// Short month label, e.g. `Jan`.
    pub month_label: String,
    /// Month + year label, e.g. `Jan 2024`.
    pub period_label: String,
}

/// A `SalesRecord` plus its calendar features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub record: SalesRecord,
    pub calendar: CalendarFeatures,
}

impl FeatureRecord {
    pub fn units_sold(&self) -> f64 {
        self.record.units_sold
    }

    pub fn price(&self) -> f64 {
        self.record.price
    }
}

/// Inputs for a pricing run.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub location: String,
    pub units: f64,
    pub month: i32,
}

/// Inputs for a forecast run.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub location: String,
    pub months: usize,
}

/// How CLI reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (same body the HTTP endpoints return).
    Json,
    /// Plain-text summary for terminals.
    Text,
}
