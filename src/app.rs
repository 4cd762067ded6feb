//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs one-shot reports or starts the HTTP server

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EoqArgs, ForecastArgs, PricingArgs, ServeArgs};
use crate::domain::{ForecastConfig, OutputFormat, PricingConfig};
use crate::error::AppError;
use crate::report::{EoqReport, format_forecast_summary, format_pricing_summary};

pub mod pipeline;

/// Entry point for the `insights` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Pricing(args) => handle_pricing(args),
        Command::Forecast(args) => handle_forecast(args),
        Command::Eoq(args) => handle_eoq(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sales_insights=info,tower_http=info"));
    // Logs go to stderr so CLI reports on stdout stay machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::new(1, format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(crate::server::serve(&args.host, args.port))
}

fn handle_pricing(args: PricingArgs) -> Result<(), AppError> {
    let config = PricingConfig {
        location: args.csv,
        units: args.units,
        month: args.month,
    };
    let run = pipeline::run_pricing(&config)?;

    match args.format {
        OutputFormat::Json => print_json(&run.report),
        OutputFormat::Text => {
            println!("{}", format_pricing_summary(&run.report));
            println!("Rows read: {} | dropped: {}", run.rows_read, run.rows_dropped);
            Ok(())
        }
    }
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = ForecastConfig {
        location: args.csv,
        months: args.months,
    };
    let run = pipeline::run_forecast(&config)?;

    match args.format {
        OutputFormat::Json => print_json(&run.report),
        OutputFormat::Text => {
            println!("{}", format_forecast_summary(&run.report));
            println!("Rows read: {} | dropped: {}", run.rows_read, run.rows_dropped);
            Ok(())
        }
    }
}

fn handle_eoq(args: EoqArgs) -> Result<(), AppError> {
    let eoq = crate::inventory::economic_order_quantity(args.demand, args.ordering_cost, args.holding_cost)?;
    print_json(&EoqReport { eoq })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(1, format!("Failed to serialize report: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Rewrite argv so `insights` defaults to `insights serve`.
///
/// Rules:
/// - `insights`                      -> `insights serve`
/// - `insights --port 8080 ...`      -> `insights serve --port 8080 ...`
/// - `insights --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
    }

    argv
}
