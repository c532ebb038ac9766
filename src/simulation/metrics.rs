// src/simulation/metrics.rs

use crate::ensure_domain;
use crate::error::{InventoryError, Result};
use crate::simulation::engine::SimulationResult;
use serde::{Serialize, Serializer};

/// Decimal places used when costs are displayed.
pub const COST_PRECISION: i32 = 2;
/// Decimal places used when the service level is displayed.
pub const SERVICE_LEVEL_PRECISION: i32 = 3;

/// KPI summary of one simulation run.
///
/// Fields hold raw values so sweeps can be compared without compounding
/// rounding error. Serialization rounds them and uses the display names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    #[serde(rename = "Total Cost", serialize_with = "serialize_cost")]
    pub total_cost: f64,
    #[serde(rename = "Holding Cost", serialize_with = "serialize_cost")]
    pub holding_cost: f64,
    #[serde(rename = "Ordering Cost", serialize_with = "serialize_cost")]
    pub ordering_cost: f64,
    #[serde(rename = "Orders")]
    pub order_count: usize,
    #[serde(rename = "Service Level", serialize_with = "serialize_service_level")]
    pub service_level: f64,
}

impl Metrics {
    /// Copy with every figure rounded to its display precision.
    pub fn rounded(&self) -> Self {
        Self {
            total_cost: round_to(self.total_cost, COST_PRECISION),
            holding_cost: round_to(self.holding_cost, COST_PRECISION),
            ordering_cost: round_to(self.ordering_cost, COST_PRECISION),
            order_count: self.order_count,
            service_level: round_to(self.service_level, SERVICE_LEVEL_PRECISION),
        }
    }
}

/// Reduces a run to its metrics.
///
/// Fill rate is `1 - stockouts / total_demand`; with no realized demand it is
/// undefined and `DivideByZero` is returned for the caller to handle.
/// Negative or non-finite totals are a `Domain` error.
pub fn evaluate(result: &SimulationResult, total_realized_demand: f64) -> Result<Metrics> {
    ensure_domain!(
        total_realized_demand.is_finite() && total_realized_demand >= 0.0,
        "total realized demand must be finite and non-negative, got {total_realized_demand}"
    );
    if total_realized_demand == 0.0 {
        return Err(InventoryError::DivideByZero);
    }
    Ok(Metrics {
        total_cost: result.total_cost(),
        holding_cost: result.holding_cost,
        ordering_cost: result.ordering_cost,
        order_count: result.order_count,
        service_level: 1.0 - result.stockout_units / total_realized_demand,
    })
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let mult = 10_f64.powi(places);
    (value * mult).round() / mult
}

fn serialize_cost<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, COST_PRECISION))
}

fn serialize_service_level<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, SERVICE_LEVEL_PRECISION))
}
