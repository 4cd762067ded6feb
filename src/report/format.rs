//! Plain-text formatting of reports for terminal output.
//!
//! Kept apart from the view code so the numbers stay testable and output
//! changes are localized.

use super::{ForecastReport, PricingReport};

/// Format a pricing report as a short terminal summary.
pub fn format_pricing_summary(report: &PricingReport) -> String {
    let legacy = &report.legacy;
    let modern = &report.modern;
    let mut out = String::new();

    out.push_str("=== Pricing analysis ===\n");
    out.push_str(&format!(
        "Suggested price for {} units in month {}: {:.2}\n",
        legacy.for_units, legacy.for_month, legacy.suggested_price
    ));
    out.push_str(&format!("Rows analysed: {}\n", modern.sales_trend.len()));

    out.push_str("\nUnits by period:\n");
    for p in &modern.product_performance {
        out.push_str(&format!("  {:<10} {:>12.2}\n", p.product, p.units));
    }

    out.push_str("\nUnits by calendar month:\n");
    for s in &modern.seasonal_trends {
        out.push_str(&format!("  {:<10} {:>12.2}\n", s.month, s.sales));
    }

    out.push_str("\nPrice bands:\n");
    for b in &modern.sales_distribution {
        out.push_str(&format!("  {:<16} {:>6}\n", b.category, b.value));
    }

    out
}

/// Format a forecast report as a table.
pub fn format_forecast_summary(report: &ForecastReport) -> String {
    let summary = &report.forecast_summary;
    let mut out = String::new();

    out.push_str(&format!("=== Units forecast (next {} months) ===\n", summary.next_n_months));
    out.push_str(&format!("{:<10} {:>12} {:>12} {:>12}\n", "Month", "Forecast", "Lower", "Upper"));
    for r in &summary.records {
        out.push_str(&format!(
            "{:<10} {:>12.2} {:>12.2} {:>12.2}\n",
            r.month, r.forecast, r.lower, r.upper
        ));
    }

    out
}
