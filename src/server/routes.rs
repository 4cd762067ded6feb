//! API route handlers.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::app::pipeline;
use crate::domain::{
    DEFAULT_FORECAST_MONTHS, DEFAULT_PRICING_MONTH, DEFAULT_PRICING_UNITS, ForecastConfig, PricingConfig,
};
use crate::error::InsightError;
use crate::fit::parse_horizon;
use crate::inventory::{DEMO_DEMAND, DEMO_HOLDING_COST, DEMO_ORDERING_COST, economic_order_quantity};
use crate::report::{EoqReport, ErrorBody, FORECAST_HINT, PRICING_HINT};

/// Raw query parameters; parsed by hand so bad values get a JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastParams {
    pub csv_url: Option<String>,
    pub months: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PricingParams {
    pub csv_url: Option<String>,
    pub units: Option<String>,
    pub month: Option<String>,
}

pub async fn forecast(Query(params): Query<ForecastParams>) -> Response {
    let result = match forecast_config(params) {
        Ok(config) => run_blocking(move || pipeline::run_forecast(&config)).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(run) => {
            tracing::info!(rows_read = run.rows_read, rows_dropped = run.rows_dropped, "forecast served");
            Json(run.report).into_response()
        }
        Err(err) => error_response("forecast", &err, FORECAST_HINT),
    }
}

pub async fn inventory() -> Response {
    match economic_order_quantity(DEMO_DEMAND, DEMO_ORDERING_COST, DEMO_HOLDING_COST) {
        Ok(eoq) => Json(EoqReport { eoq }).into_response(),
        Err(err) => {
            tracing::error!(endpoint = "inventory", "request failed: {err}");
            let body = ErrorBody {
                error: err.to_string(),
                hint: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub async fn pricing(Query(params): Query<PricingParams>) -> Response {
    let result = match pricing_config(params) {
        Ok(config) => run_blocking(move || pipeline::run_pricing(&config)).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(run) => {
            tracing::info!(rows_read = run.rows_read, rows_dropped = run.rows_dropped, "pricing served");
            Json(run.report).into_response()
        }
        Err(err) => error_response("pricing", &err, PRICING_HINT),
    }
}

fn forecast_config(params: ForecastParams) -> Result<ForecastConfig, InsightError> {
    let months = match params.months.as_deref() {
        None => DEFAULT_FORECAST_MONTHS,
        Some(raw) => parse_horizon(raw)?,
    };
    // No source to read is a source failure here, answered with the forecast hint.
    let location = required_location(params.csv_url)
        .map_err(|err| InsightError::SourceUnavailable(err.to_string()))?;
    Ok(ForecastConfig { location, months })
}

fn pricing_config(params: PricingParams) -> Result<PricingConfig, InsightError> {
    let location = required_location(params.csv_url)?;

    let units = match params.units.as_deref() {
        None => DEFAULT_PRICING_UNITS,
        Some(raw) => crate::io::parse_number(raw)
            .ok_or_else(|| InsightError::ValidationError(format!("Invalid units '{raw}': expected a number")))?,
    };
    let month = match params.month.as_deref() {
        None => DEFAULT_PRICING_MONTH,
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| InsightError::ValidationError(format!("Invalid month '{raw}': expected an integer")))?,
    };

    Ok(PricingConfig { location, units, month })
}

fn required_location(csv_url: Option<String>) -> Result<String, InsightError> {
    csv_url
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| InsightError::ValidationError("Missing csv_url".to_string()))
}

/// Run a synchronous pipeline step on tokio's blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, InsightError>
where
    F: FnOnce() -> Result<T, InsightError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| InsightError::Internal(format!("pipeline task failed: {e}")))?
}

fn error_response(endpoint: &str, err: &InsightError, hint: &str) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_client_error() {
        tracing::warn!(endpoint, "rejected request: {err}");
    } else {
        tracing::error!(endpoint, "request failed: {err}");
    }
    (status, Json(ErrorBody::from_error(err, hint))).into_response()
}
