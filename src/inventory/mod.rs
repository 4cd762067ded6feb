//! Inventory utilities.
//!
//! Economic Order Quantity is the order size that minimises the sum of
//! ordering and holding cost:
//!
//! ```text
//! EOQ = sqrt(2 * D * S / H)
//! ```
//!
//! where `D` is the demand rate, `S` the cost per order, `H` the holding cost
//! per unit. Independent of the CSV pipeline.

use crate::error::InsightError;
use crate::math::round2;

/// Demonstration inputs served by the inventory endpoint.
pub const DEMO_DEMAND: f64 = 500.0;
pub const DEMO_ORDERING_COST: f64 = 100.0;
pub const DEMO_HOLDING_COST: f64 = 2.0;

/// EOQ rounded to 2 decimal places.
pub fn economic_order_quantity(
    demand_rate: f64,
    ordering_cost: f64,
    holding_cost: f64,
) -> Result<f64, InsightError> {
    for (name, v) in [
        ("demand rate", demand_rate),
        ("ordering cost", ordering_cost),
        ("holding cost", holding_cost),
    ] {
        if !v.is_finite() {
            return Err(InsightError::DomainError(format!("{name} must be a finite number")));
        }
        if v < 0.0 {
            return Err(InsightError::DomainError(format!("{name} must not be negative")));
        }
    }
    if holding_cost == 0.0 {
        return Err(InsightError::DomainError("holding cost must be non-zero".to_string()));
    }

    Ok(round2((2.0 * demand_rate * ordering_cost / holding_cost).sqrt()))
}
