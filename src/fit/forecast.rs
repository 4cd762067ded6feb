//! Units-sold forecaster: linear trend plus month-of-year offsets.
//!
//! The model is fitted on the `(date, units)` series ordered by date:
//!
//! ```text
//! units(t) = b0 + b1 * days_since_first + s[month(t)]
//! ```
//!
//! - `s` is only estimated when the history covers at least a full year
//!   (otherwise every month offset is zero). Each offset is the mean trend
//!   residual observed in that calendar month.
//! - Bounds are an 80% prediction interval from the residual spread, widened by
//!   the distance from the observed time mean (standard OLS prediction interval).
//! - Forecast periods are the calendar month-ends strictly after the latest
//!   observation, matching a month-end frequency calendar.

use chrono::{Datelike, Months, NaiveDate};
use nalgebra::{DMatrix, DVector};

use crate::domain::{MAX_FORECAST_MONTHS, UnitsRecord};
use crate::error::InsightError;
use crate::math::{LinearFit, fit_with_intercept, round2};

/// A single trend point cannot establish a direction.
pub const MIN_DISTINCT_DATES: usize = 2;

/// History span (days) needed before month-of-year offsets are estimated.
const SEASONAL_MIN_SPAN_DAYS: i64 = 365;

/// Two-sided z-score for an 80% interval.
const Z_80: f64 = 1.281_551_565_545;

/// One forecast period.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub period_end: NaiveDate,
    /// `%b %Y` label of the period.
    pub label: String,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Fitted forecaster. Built per request from the current series.
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    origin: NaiveDate,
    last_date: NaiveDate,
    trend: LinearFit,
    seasonal: [f64; 12],
    residual_sd: f64,
    x_mean: f64,
    sxx: f64,
}

impl TrendForecaster {
    pub fn fit(records: &[UnitsRecord]) -> Result<Self, InsightError> {
        if records.is_empty() {
            return Err(InsightError::InsufficientData(
                "cannot forecast from an empty series".to_string(),
            ));
        }

        let mut series: Vec<(NaiveDate, f64)> = records.iter().map(|r| (r.date, r.units_sold)).collect();
        series.sort_by_key(|(d, _)| *d);

        let origin = series[0].0;
        let last_date = series[series.len() - 1].0;

        let mut distinct = series.iter().map(|(d, _)| *d).collect::<Vec<_>>();
        distinct.dedup();
        if distinct.len() < MIN_DISTINCT_DATES {
            return Err(InsightError::InsufficientData(format!(
                "need at least {MIN_DISTINCT_DATES} distinct dates to extrapolate, got {}",
                distinct.len()
            )));
        }

        let n = series.len();
        let xs: Vec<f64> = series.iter().map(|(d, _)| days_between(origin, *d)).collect();
        let x = DMatrix::from_column_slice(n, 1, &xs);
        let y = DVector::from_iterator(n, series.iter().map(|(_, v)| *v));

        let trend = fit_with_intercept(&x, &y).ok_or_else(|| {
            InsightError::InsufficientData("trend regression has no stable solution".to_string())
        })?;

        let residuals: Vec<f64> = xs
            .iter()
            .zip(&series)
            .map(|(x, (_, v))| v - trend.predict(&[*x]))
            .collect();

        let mut seasonal = [0.0; 12];
        let mut seasonal_params = 0usize;
        if (last_date - origin).num_days() >= SEASONAL_MIN_SPAN_DAYS {
            let mut sums = [0.0; 12];
            let mut counts = [0usize; 12];
            for ((d, _), r) in series.iter().zip(&residuals) {
                let m = d.month0() as usize;
                sums[m] += r;
                counts[m] += 1;
            }
            for m in 0..12 {
                if counts[m] > 0 {
                    seasonal[m] = sums[m] / counts[m] as f64;
                    seasonal_params += 1;
                }
            }
        }

        let sse: f64 = series
            .iter()
            .zip(&residuals)
            .map(|((d, _), r)| (r - seasonal[d.month0() as usize]).powi(2))
            .sum();
        let dof = n.saturating_sub(2 + seasonal_params).max(1);
        let residual_sd = (sse / dof as f64).sqrt();

        let x_mean = trend.x_means[0];
        let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();

        tracing::debug!(
            n,
            slope_per_day = trend.coefficients[0],
            residual_sd,
            seasonal = seasonal_params > 0,
            "fitted trend forecaster"
        );

        Ok(Self {
            origin,
            last_date,
            trend,
            seasonal,
            residual_sd,
            x_mean,
            sxx,
        })
    }

    /// Latest observed date.
    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Estimates for the next `periods` month-ends, in chronological order.
    pub fn forecast(&self, periods: usize) -> Result<Vec<ForecastPoint>, InsightError> {
        if periods == 0 || periods > MAX_FORECAST_MONTHS {
            return Err(InsightError::ValidationError(format!(
                "forecast horizon must be between 1 and {MAX_FORECAST_MONTHS} months, got {periods}"
            )));
        }

        let n = self.trend.n as f64;
        let mut out = Vec::new();
        let mut period_end = month_end(self.last_date).ok_or_else(out_of_calendar)?;
        if period_end <= self.last_date {
            period_end = next_month_end(period_end).ok_or_else(out_of_calendar)?;
        }

        for _ in 0..periods {
            let x = days_between(self.origin, period_end);
            let estimate = self.trend.predict(&[x]) + self.seasonal[period_end.month0() as usize];
            let leverage = if self.sxx > 0.0 {
                (x - self.x_mean).powi(2) / self.sxx
            } else {
                0.0
            };
            let half_width = Z_80 * self.residual_sd * (1.0 + 1.0 / n + leverage).sqrt();

            out.push(ForecastPoint {
                period_end,
                label: period_end.format("%b %Y").to_string(),
                estimate: round2(estimate),
                lower: round2(estimate - half_width),
                upper: round2(estimate + half_width),
            });

            period_end = next_month_end(period_end).ok_or_else(out_of_calendar)?;
        }

        Ok(out)
    }
}

/// Parse a user-supplied horizon: a whole number of months in
/// `1..=MAX_FORECAST_MONTHS`.
pub fn parse_horizon(raw: &str) -> Result<usize, InsightError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_FORECAST_MONTHS).contains(&n) => Ok(n),
        _ => Err(InsightError::ValidationError(format!(
            "Invalid months '{raw}': expected an integer between 1 and {MAX_FORECAST_MONTHS}"
        ))),
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}

/// Last day of `date`'s month.
fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))?.pred_opt()
}

fn next_month_end(end: NaiveDate) -> Option<NaiveDate> {
    month_end(end.succ_opt()?)
}

fn out_of_calendar() -> InsightError {
    InsightError::DomainError("forecast period falls outside the supported calendar".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(date: NaiveDate, units: f64) -> UnitsRecord {
        UnitsRecord { date, units_sold: units }
    }

    #[test]
    fn empty_series_is_insufficient() {
        let err = TrendForecaster::fit(&[]).unwrap_err();
        assert!(matches!(err, InsightError::InsufficientData(_)));
    }

    #[test]
    fn single_date_is_insufficient() {
        let d = ymd(2024, 3, 1);
        let err = TrendForecaster::fit(&[rec(d, 10.0), rec(d, 12.0)]).unwrap_err();
        assert!(matches!(err, InsightError::InsufficientData(_)));
    }

    #[test]
    fn exact_trend_extrapolates_to_month_ends() {
        // units = 100 + 2 * day, Jan 1..Jan 30 2024
        let start = ymd(2024, 1, 1);
        let records: Vec<UnitsRecord> = (0..30)
            .map(|i| rec(start + chrono::Days::new(i), 100.0 + 2.0 * i as f64))
            .collect();

        let model = TrendForecaster::fit(&records).unwrap();
        let out = model.forecast(3).unwrap();

        let labels: Vec<&str> = out.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(out[0].period_end, ymd(2024, 1, 31));
        assert_eq!(out[1].period_end, ymd(2024, 2, 29));
        assert_eq!(out[0].estimate, 160.0);
        assert_eq!(out[1].estimate, 218.0);
        assert_eq!(out[2].estimate, 280.0);
        for p in &out {
            assert_eq!(p.lower, p.estimate);
            assert_eq!(p.upper, p.estimate);
        }
    }

    #[test]
    fn month_end_history_starts_next_month() {
        let records = vec![rec(ymd(2024, 1, 31), 10.0), rec(ymd(2024, 2, 29), 20.0)];
        let out = TrendForecaster::fit(&records).unwrap().forecast(2).unwrap();
        assert_eq!(out[0].period_end, ymd(2024, 3, 31));
        assert_eq!(out[1].period_end, ymd(2024, 4, 30));
    }

    #[test]
    fn unsorted_input_is_ordered_by_date() {
        let records = vec![rec(ymd(2024, 3, 15), 30.0), rec(ymd(2024, 1, 15), 10.0), rec(ymd(2024, 2, 15), 20.0)];
        let model = TrendForecaster::fit(&records).unwrap();
        assert_eq!(model.last_date(), ymd(2024, 3, 15));
        let out = model.forecast(1).unwrap();
        assert_eq!(out[0].label, "Mar 2024");
        assert!(out[0].estimate > 30.0);
    }

    #[test]
    fn noisy_history_has_ordered_bounds() {
        let start = ymd(2024, 1, 1);
        let records: Vec<UnitsRecord> = (0..60)
            .map(|i| {
                let wiggle = if i % 2 == 0 { 5.0 } else { -5.0 };
                rec(start + chrono::Days::new(i), 50.0 + i as f64 + wiggle)
            })
            .collect();
        let out = TrendForecaster::fit(&records).unwrap().forecast(3).unwrap();
        for p in &out {
            assert!(p.lower < p.estimate && p.estimate < p.upper, "{p:?}");
        }
        // Uncertainty grows with distance from the history.
        assert!(out[2].upper - out[2].lower > out[0].upper - out[0].lower);
    }

    #[test]
    fn yearly_history_picks_up_december_peak() {
        let mut records = Vec::new();
        for year in [2022, 2023] {
            for month in 1..=12 {
                let units = if month == 12 { 160.0 } else { 100.0 };
                records.push(rec(ymd(year, month, 15), units));
            }
        }
        let out = TrendForecaster::fit(&records).unwrap().forecast(2).unwrap();
        assert_eq!(out[0].label, "Dec 2023");
        assert_eq!(out[1].label, "Jan 2024");
        assert!(out[0].estimate > out[1].estimate + 40.0, "{out:?}");
    }

    #[test]
    fn horizon_text_is_bounded() {
        assert_eq!(parse_horizon(" 12 "), Ok(12));
        assert_eq!(parse_horizon("120"), Ok(MAX_FORECAST_MONTHS));
        for raw in ["0", "121", "10000000000000", "-1", "three", ""] {
            assert!(matches!(parse_horizon(raw), Err(InsightError::ValidationError(_))), "{raw}");
        }
    }

    #[test]
    fn horizon_outside_bounds_is_rejected() {
        let records = vec![rec(ymd(2024, 1, 1), 1.0), rec(ymd(2024, 1, 2), 2.0)];
        let model = TrendForecaster::fit(&records).unwrap();
        for periods in [0, MAX_FORECAST_MONTHS + 1, usize::MAX] {
            let err = model.forecast(periods).unwrap_err();
            assert!(matches!(err, InsightError::ValidationError(_)), "{periods}: {err:?}");
        }
        assert_eq!(model.forecast(MAX_FORECAST_MONTHS).unwrap().len(), MAX_FORECAST_MONTHS);
    }
}
