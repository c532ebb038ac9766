// src/simulation/sweep.rs

use crate::error::Result;
use crate::model::demand_series::DemandSeries;
use crate::simulation::config::PolicyParameters;
use crate::simulation::engine::InventorySimulation;
use crate::simulation::metrics::{evaluate, Metrics};
use crate::strategy::optimization::derive_policy;
use serde::Serialize;
use tracing::info;

/// Outcome of the policy at one target service level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub target_service_level: f64,
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub metrics: Metrics,
}

/// Re-derives the reorder point for each service level and simulates it.
///
/// The order quantity comes from the base parameters and is shared by every
/// point, so only `R` moves across the curve.
pub fn service_level_sweep(
    demand: &DemandSeries,
    params: &PolicyParameters,
    levels: &[f64],
) -> Result<Vec<SweepPoint>> {
    let stats = demand.stats()?;
    let order_quantity = derive_policy(&stats, params)?.order_quantity;

    levels
        .iter()
        .map(|&level| -> Result<SweepPoint> {
            let swept = params.with_service_level(level);
            let mut policy = derive_policy(&stats, &swept)?;
            policy.order_quantity = order_quantity;

            let result = InventorySimulation::from_policy(&policy, &swept)?.run(demand);
            let metrics = evaluate(&result, stats.total)?;
            info!(
                csl = level,
                reorder_point = policy.reorder_point,
                total_cost = metrics.total_cost,
                service_level = metrics.service_level,
                "sweep point"
            );
            Ok(SweepPoint {
                target_service_level: level,
                reorder_point: policy.reorder_point,
                order_quantity,
                metrics,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    fn demand() -> DemandSeries {
        DemandSeries::from_units(&[8, 12, 10, 15, 5, 9, 11, 14, 6, 10, 13, 7, 10, 12, 8, 9])
    }

    #[test]
    fn one_point_per_level_with_shared_quantity() {
        let levels = [0.85, 0.90, 0.95, 0.98, 0.99];
        let points = service_level_sweep(&demand(), &PolicyParameters::default(), &levels).unwrap();
        assert_eq!(points.len(), levels.len());
        let q = points[0].order_quantity;
        for pair in points.windows(2) {
            assert_eq!(pair[1].order_quantity, q);
            assert!(pair[1].reorder_point >= pair[0].reorder_point);
        }
    }

    #[test]
    fn invalid_level_fails_the_sweep() {
        let result = service_level_sweep(&demand(), &PolicyParameters::default(), &[0.9, 1.0]);
        assert!(matches!(result, Err(InventoryError::Domain(_))));
    }

    #[test]
    fn zero_demand_cannot_be_evaluated() {
        let demand = DemandSeries::from_units(&[0, 0, 0]);
        let result = service_level_sweep(&demand, &PolicyParameters::default(), &[0.9]);
        assert_eq!(result, Err(InventoryError::DivideByZero));
    }
}
