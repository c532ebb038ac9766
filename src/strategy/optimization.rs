// src/strategy/optimization.rs

//! Reorder-point and order-quantity calculations.
//!
//! Safety stock follows the lead-time-demand approximation: demand over the
//! lead time is a sum of `L` i.i.d. daily demands, and the lead time itself is
//! an independent random duration. The order quantity is the classic EOQ and
//! does not depend on the service target.

use crate::ensure_domain;
use crate::error::{InventoryError, Result};
use crate::model::demand_series::DemandStats;
use crate::simulation::config::PolicyParameters;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Days used to annualize mean daily demand for the EOQ.
pub const ANNUAL_DAYS: f64 = 365.0;

/// Standard normal quantile at `service_level`.
///
/// Both bounds are rejected: the quantile is infinite at 0 and 1.
pub fn z_score(service_level: f64) -> Result<f64> {
    ensure_domain!(
        service_level > 0.0 && service_level < 1.0,
        "service level must lie strictly between 0 and 1, got {service_level}"
    );
    let standard = Normal::new(0.0, 1.0).map_err(|e| InventoryError::Domain(e.to_string()))?;
    Ok(standard.inverse_cdf(service_level))
}

/// Safety stock for a target cycle service level.
///
/// # Formula
/// Var(LTD) = E[L] * Var(D) + E[D]^2 * Var(L)
/// SS = z(csl) * sqrt(Var(LTD))
///
/// # Arguments
/// * `mean_demand` - Mean demand per day.
/// * `var_demand` - Variance of daily demand.
/// * `mean_lead_time` - Mean lead time in days.
/// * `var_lead_time` - Variance of the lead time. Zero for a fixed lead time.
/// * `target_service_level` - Cycle service level in (0, 1).
///
/// Negative results only occur below a 50% service level.
pub fn safety_stock(
    mean_demand: f64,
    var_demand: f64,
    mean_lead_time: f64,
    var_lead_time: f64,
    target_service_level: f64,
) -> Result<f64> {
    ensure_domain!(
        var_demand >= 0.0 && var_lead_time >= 0.0,
        "variances must be non-negative, got demand {var_demand} and lead time {var_lead_time}"
    );
    ensure_domain!(
        mean_lead_time >= 0.0,
        "mean lead time must be non-negative, got {mean_lead_time}"
    );
    let z = z_score(target_service_level)?;
    let var_ltd = mean_lead_time * var_demand + mean_demand.powi(2) * var_lead_time;
    Ok(z * var_ltd.sqrt())
}

/// Expected lead-time demand plus the safety buffer.
pub fn reorder_point(mean_demand: f64, mean_lead_time: f64, safety_stock: f64) -> f64 {
    mean_demand * mean_lead_time + safety_stock
}

/// Economic order quantity: sqrt(2 * K * D / h).
pub fn eoq(order_cost: f64, annual_demand: f64, holding_cost: f64) -> Result<f64> {
    ensure_domain!(
        holding_cost > 0.0,
        "holding cost must be positive, got {holding_cost}"
    );
    ensure_domain!(
        order_cost >= 0.0 && annual_demand >= 0.0,
        "order cost and annual demand must be non-negative, got {order_cost} and {annual_demand}"
    );
    Ok((2.0 * order_cost * annual_demand / holding_cost).sqrt())
}

/// The derived parameters of a (Q, R) policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub order_quantity: f64,
}

/// Derives SS, R and Q from demand statistics, assuming a fixed lead time.
pub fn derive_policy(stats: &DemandStats, params: &PolicyParameters) -> Result<ReorderPolicy> {
    params.validate()?;
    let lead_time = f64::from(params.lead_time_days);
    let ss = safety_stock(
        stats.mean,
        stats.variance,
        lead_time,
        0.0,
        params.target_service_level,
    )?;
    let order_quantity = eoq(params.order_cost, stats.mean * ANNUAL_DAYS, params.holding_cost)?;
    Ok(ReorderPolicy {
        safety_stock: ss,
        reorder_point: reorder_point(stats.mean, lead_time, ss),
        order_quantity,
    })
}
