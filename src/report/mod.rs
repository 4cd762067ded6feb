//! Reporting: view construction and response assembly.
//!
//! The structs here define the JSON bodies shared by the HTTP endpoints and
//! the CLI. Field renames pin the wire keys.

use serde::Serialize;

use crate::domain::FeatureRecord;
use crate::error::InsightError;
use crate::fit::{ForecastPoint, PriceModel};

pub mod format;
pub mod views;

pub use format::*;
pub use views::*;

/// Hint attached to pricing failures.
pub const PRICING_HINT: &str = "Ensure the CSV has 'Date', 'Units_Sold', and 'Price' columns with valid data.";
/// Hint attached to forecast failures.
pub const FORECAST_HINT: &str = "Ensure the CSV has 'Date' and 'Units_Sold' columns with valid data.";

/// Pricing body: `{legacy, modern}`.
#[derive(Debug, Clone, Serialize)]
pub struct PricingReport {
    pub legacy: LegacyPricing,
    pub modern: ModernPricing,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyPricing {
    #[serde(rename = "For_Units", serialize_with = "views::serialize_quantity")]
    pub for_units: f64,
    #[serde(rename = "For_Month")]
    pub for_month: i32,
    #[serde(rename = "Suggested_Price")]
    pub suggested_price: f64,
    #[serde(rename = "Price_Trend")]
    pub price_trend: Vec<LegacyTrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernPricing {
    pub sales_trend: Vec<TrendPoint>,
    pub product_performance: Vec<PeriodUnits>,
    pub seasonal_trends: Vec<SeasonalSales>,
    pub sales_distribution: Vec<BandCount>,
}

/// Forecast body: `{forecast_summary: {next_n_months, records}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub forecast_summary: ForecastSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastSummary {
    pub next_n_months: usize,
    pub records: Vec<ForecastRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub month: String,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Inventory body: `{EOQ}`.
#[derive(Debug, Clone, Serialize)]
pub struct EoqReport {
    #[serde(rename = "EOQ")]
    pub eoq: f64,
}

/// Uniform error body: `{error, hint?}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorBody {
    /// Build the body for `err`; validation errors never carry a hint.
    pub fn from_error(err: &InsightError, hint: &str) -> Self {
        let hint = match err {
            InsightError::ValidationError(_) => None,
            _ => Some(hint.to_string()),
        };
        Self {
            error: err.to_string(),
            hint,
        }
    }
}

/// Assemble the pricing body from features and a fitted model.
pub fn build_pricing_report(
    records: &[FeatureRecord],
    model: &PriceModel,
    units: f64,
    month: i32,
) -> PricingReport {
    PricingReport {
        legacy: LegacyPricing {
            for_units: units,
            for_month: month,
            suggested_price: model.predict(units, month),
            price_trend: legacy_price_trend(records),
        },
        modern: ModernPricing {
            sales_trend: sales_trend(records),
            product_performance: period_performance(records),
            seasonal_trends: seasonal_summary(records),
            sales_distribution: price_distribution(records),
        },
    }
}

/// Assemble the forecast body.
pub fn build_forecast_report(points: &[ForecastPoint]) -> ForecastReport {
    ForecastReport {
        forecast_summary: ForecastSummary {
            next_n_months: points.len(),
            records: points
                .iter()
                .map(|p| ForecastRecord {
                    month: p.label.clone(),
                    forecast: p.estimate,
                    lower: p.lower,
                    upper: p.upper,
                })
                .collect(),
        },
    }
}
