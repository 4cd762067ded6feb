//! Price regression: `price ~ b0 + b1 * units + b2 * month`.

use nalgebra::{DMatrix, DVector};

use crate::domain::FeatureRecord;
use crate::error::InsightError;
use crate::math::{LinearFit, fit_with_intercept, round2};

/// Linear price model fitted on (units sold, month index).
#[derive(Debug, Clone)]
pub struct PriceModel {
    fit: LinearFit,
}

impl PriceModel {
    /// Fit over all feature records.
    pub fn fit(records: &[FeatureRecord]) -> Result<Self, InsightError> {
        if records.is_empty() {
            return Err(InsightError::InsufficientData(
                "cannot fit a price model on zero observations".to_string(),
            ));
        }

        let n = records.len();
        let x = DMatrix::from_fn(n, 2, |i, j| match j {
            0 => records[i].units_sold(),
            _ => f64::from(records[i].calendar.month),
        });
        let y = DVector::from_iterator(n, records.iter().map(FeatureRecord::price));

        let fit = fit_with_intercept(&x, &y).ok_or_else(|| {
            InsightError::InsufficientData("price regression has no stable solution".to_string())
        })?;

        tracing::debug!(
            intercept = fit.intercept,
            units_coef = fit.coefficients[0],
            month_coef = fit.coefficients[1],
            n = fit.n,
            "fitted price model"
        );

        Ok(Self { fit })
    }

    /// Predicted price, rounded to 2 decimals.
    ///
    /// Months outside 1–12 are extrapolated, not rejected.
    pub fn predict(&self, units: f64, month: i32) -> f64 {
        round2(self.fit.predict(&[units, f64::from(month)]))
    }

    pub fn intercept(&self) -> f64 {
        self.fit.intercept
    }

    /// Coefficients for `(units, month)`.
    pub fn coefficients(&self) -> (f64, f64) {
        (self.fit.coefficients[0], self.fit.coefficients[1])
    }
}
