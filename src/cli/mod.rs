//! Command-line parsing for the sales insights service.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline and server code.

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_FORECAST_MONTHS, DEFAULT_PRICING_MONTH, DEFAULT_PRICING_UNITS, OutputFormat,
};
use crate::fit::parse_horizon;
use crate::inventory::{DEMO_DEMAND, DEMO_HOLDING_COST, DEMO_ORDERING_COST};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "insights", version, about = "Sales CSV insights: pricing, forecasting, EOQ")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the `/pricing`, `/forecast`, and `/inventory` HTTP endpoints.
    Serve(ServeArgs),
    /// Run the pricing analysis on a CSV and print the report.
    Pricing(PricingArgs),
    /// Forecast units sold from a CSV and print the report.
    Forecast(ForecastArgs),
    /// Compute the economic order quantity.
    Eoq(EoqArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5001)]
    pub port: u16,
}

#[derive(Debug, Parser, Clone)]
pub struct PricingArgs {
    /// CSV URL or path (needs `Date`, `Units_Sold`, `Price`).
    pub csv: String,

    /// Units sold to predict a price for.
    #[arg(short = 'u', long, default_value_t = DEFAULT_PRICING_UNITS)]
    pub units: f64,

    /// Month index to predict a price for (values outside 1-12 extrapolate).
    #[arg(short = 'm', long, default_value_t = DEFAULT_PRICING_MONTH, allow_negative_numbers = true)]
    pub month: i32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// CSV URL or path (needs `Date`, `Units_Sold`).
    pub csv: String,

    /// Number of month-end periods to forecast (1-120).
    #[arg(short = 'n', long, default_value_t = DEFAULT_FORECAST_MONTHS, value_parser = parse_months)]
    pub months: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
pub struct EoqArgs {
    /// Demand rate (units per period).
    #[arg(long, default_value_t = DEMO_DEMAND)]
    pub demand: f64,

    /// Cost per order placed.
    #[arg(long, default_value_t = DEMO_ORDERING_COST)]
    pub ordering_cost: f64,

    /// Holding cost per unit per period.
    #[arg(long, default_value_t = DEMO_HOLDING_COST)]
    pub holding_cost: f64,
}

fn parse_months(raw: &str) -> Result<usize, String> {
    parse_horizon(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_defaults() {
        let cli = Cli::parse_from(["insights", "pricing", "sales.csv"]);
        let Command::Pricing(args) = cli.command else {
            panic!("expected pricing");
        };
        assert_eq!(args.units, 120.0);
        assert_eq!(args.month, 6);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn forecast_months_flag() {
        let cli = Cli::parse_from(["insights", "forecast", "sales.csv", "-n", "6", "--format", "text"]);
        let Command::Forecast(args) = cli.command else {
            panic!("expected forecast");
        };
        assert_eq!(args.months, 6);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn forecast_months_are_bounded() {
        for months in ["0", "121", "10000000000000"] {
            let parsed = Cli::try_parse_from(["insights", "forecast", "sales.csv", "-n", months]);
            assert!(parsed.is_err(), "{months} should be rejected");
        }
        let cli = Cli::try_parse_from(["insights", "forecast", "sales.csv", "-n", "120"]).unwrap();
        let Command::Forecast(args) = cli.command else {
            panic!("expected forecast");
        };
        assert_eq!(args.months, 120);
    }
}
