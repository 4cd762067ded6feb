//! Model fitting.
//!
//! Responsibilities:
//!
//! - price regression on (units sold, month index) (`price`)
//! - units-sold extrapolation with prediction bounds (`forecast`)
//!
//! Both models are constructed fresh from the request's records and dropped
//! with the response.

pub mod forecast;
pub mod price;

pub use forecast::*;
pub use price::*;
