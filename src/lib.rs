//! `sales-insights` library crate.
//!
//! The binary (`insights`) is a thin wrapper around this library so that:
//!
//! - the CSV pipeline is testable without spawning processes
//! - the HTTP router can be driven in-process by integration tests
//! - CLI and server share one implementation of every report

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod fit;
pub mod inventory;
pub mod io;
pub mod math;
pub mod report;
pub mod server;
