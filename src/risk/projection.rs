//! Time-scaled cost projection.
//!
//! Every horizon's window cost is derived from the annual baseline with the
//! same linear scaling. Longer windows are never derived from shorter ones.

use super::horizon::{Horizon, DAYS_PER_YEAR};
use crate::errors::{Error, Result};

/// Cost attributable to the horizon window: `annual_cost * days / 365`.
///
/// Expects a validated, non-negative `annual_cost`.
pub fn projected_cost(annual_cost: f64, horizon: Horizon) -> f64 {
    annual_cost * f64::from(horizon.days()) / DAYS_PER_YEAR
}

/// Share of the projected cost considered preventable
pub fn addressable_cost(projected_cost: f64, addressable_fraction: f64) -> f64 {
    projected_cost * addressable_fraction
}

pub fn validate_annual_cost(annual_cost: f64) -> Result<f64> {
    if annual_cost.is_finite() && annual_cost >= 0.0 {
        Ok(annual_cost)
    } else {
        Err(Error::InvalidAnnualCost(annual_cost))
    }
}
