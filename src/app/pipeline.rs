//! Shared pipeline logic used by both the CLI and the HTTP front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> clean -> derive features -> fit -> build views
//!
//! Everything here is synchronous. The server runs it on the blocking pool.

use crate::domain::{ForecastConfig, PricingConfig};
use crate::error::InsightError;
use crate::features::derive_features;
use crate::fit::{PriceModel, TrendForecaster};
use crate::io::{clean_sales, clean_units, load_table};
use crate::report::{ForecastReport, PricingReport, build_forecast_report, build_pricing_report};

/// Pricing output plus ingest counters.
#[derive(Debug, Clone)]
pub struct PricingRun {
    pub report: PricingReport,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Forecast output plus ingest counters.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub report: ForecastReport,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Load `config.location` and build the pricing views.
pub fn run_pricing(config: &PricingConfig) -> Result<PricingRun, InsightError> {
    // 1) Fetch and parse.
    let table = load_table(&config.location)?;

    // 2) Validate schema and drop unusable rows.
    let cleaned = clean_sales(&table)?;

    // 3) Calendar features.
    let features = derive_features(&cleaned.records);

    // 4) Fit the price model (rejects an empty set).
    let model = PriceModel::fit(&features)?;

    // 5) Views.
    let report = build_pricing_report(&features, &model, config.units, config.month);

    Ok(PricingRun {
        report,
        rows_read: cleaned.rows_read,
        rows_dropped: cleaned.rows_dropped(),
    })
}

/// Load `config.location` and forecast units for `config.months` periods.
pub fn run_forecast(config: &ForecastConfig) -> Result<ForecastRun, InsightError> {
    let table = load_table(&config.location)?;
    let cleaned = clean_units(&table)?;

    let model = TrendForecaster::fit(&cleaned.records)?;
    let points = model.forecast(config.months)?;

    Ok(ForecastRun {
        report: build_forecast_report(&points),
        rows_read: cleaned.rows_read,
        rows_dropped: cleaned.rows_dropped(),
    })
}
