//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - required column names and request defaults
//! - cleaned records (`SalesRecord`, `UnitsRecord`)
//! - feature records (`FeatureRecord`, `CalendarFeatures`)
//! - run configuration (`PricingConfig`, `ForecastConfig`, `OutputFormat`)

pub mod types;

pub use types::*;
