// src/simulation/engine.rs

use crate::ensure_domain;
use crate::error::Result;
use crate::model::demand_series::DemandSeries;
use crate::model::queues::{PendingOrder, Pipeline};
use crate::simulation::config::PolicyParameters;
use crate::strategy::optimization::ReorderPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One simulated day, written out by the CSV reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub day: usize,
    pub demand: f64,
    pub arrivals: f64,
    pub sales: f64,
    pub stockout: f64,
    pub on_hand: f64,
    pub order_placed: bool,
    pub pipeline_orders: usize,
}

/// Final aggregates of one run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub holding_cost: f64,
    pub ordering_cost: f64,
    pub stockout_units: f64,
    pub order_count: usize,
    /// End-of-day on-hand, one entry per simulated day.
    pub inventory_trace: Vec<f64>,
    pub history: Vec<DailyRecord>,
    pub total_demand: f64,
    pub total_sales: f64,
}

impl SimulationResult {
    pub fn total_cost(&self) -> f64 {
        self.holding_cost + self.ordering_cost
    }

    pub fn days(&self) -> usize {
        self.inventory_trace.len()
    }
}

// Per-run mutable state. Never outlives `InventorySimulation::run`.
#[derive(Debug, Default)]
struct SimulationState {
    on_hand: f64,
    pipeline: Pipeline,
    holding_cost: f64,
    ordering_cost: f64,
    stockout_units: f64,
    order_count: usize,
    total_sales: f64,
    inventory_trace: Vec<f64>,
    history: Vec<DailyRecord>,
}

impl SimulationState {
    fn with_capacity(days: usize) -> Self {
        Self {
            inventory_trace: Vec::with_capacity(days),
            history: Vec::with_capacity(days),
            ..Self::default()
        }
    }

    fn into_result(self, total_demand: f64) -> SimulationResult {
        SimulationResult {
            holding_cost: self.holding_cost,
            ordering_cost: self.ordering_cost,
            stockout_units: self.stockout_units,
            order_count: self.order_count,
            inventory_trace: self.inventory_trace,
            history: self.history,
            total_demand,
            total_sales: self.total_sales,
        }
    }
}

/// Continuous-review (Q, R) inventory system stepped one day at a time.
///
/// Stock starts empty. Every day the on-hand level is at or below `R`, a new
/// order of `Q` is placed, even if earlier orders are still in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySimulation {
    reorder_point: f64,
    order_quantity: f64,
    lead_time_days: usize,
    order_cost: f64,
    holding_cost: f64,
}

impl InventorySimulation {
    pub fn new(
        reorder_point: f64,
        order_quantity: f64,
        lead_time_days: u32,
        order_cost: f64,
        holding_cost: f64,
    ) -> Result<Self> {
        ensure_domain!(
            reorder_point.is_finite(),
            "reorder point must be finite, got {reorder_point}"
        );
        ensure_domain!(
            order_quantity.is_finite() && order_quantity >= 0.0,
            "order quantity must be non-negative, got {order_quantity}"
        );
        ensure_domain!(
            order_cost.is_finite() && order_cost >= 0.0,
            "order cost must be non-negative, got {order_cost}"
        );
        ensure_domain!(
            holding_cost.is_finite() && holding_cost > 0.0,
            "holding cost must be positive, got {holding_cost}"
        );
        Ok(Self {
            reorder_point,
            order_quantity,
            lead_time_days: lead_time_days as usize,
            order_cost,
            holding_cost,
        })
    }

    pub fn from_policy(policy: &ReorderPolicy, params: &PolicyParameters) -> Result<Self> {
        Self::new(
            policy.reorder_point,
            policy.order_quantity,
            params.lead_time_days,
            params.order_cost,
            params.holding_cost,
        )
    }

    pub fn run(&self, demand: &DemandSeries) -> SimulationResult {
        let mut state = SimulationState::with_capacity(demand.len());
        for (day, &units) in demand.values().iter().enumerate() {
            self.step(&mut state, day, units);
        }

        let result = state.into_result(demand.total());
        debug!(
            days = result.days(),
            reorder_point = self.reorder_point,
            order_quantity = self.order_quantity,
            orders = result.order_count,
            holding_cost = result.holding_cost,
            ordering_cost = result.ordering_cost,
            stockout_units = result.stockout_units,
            "simulation finished"
        );
        result
    }

    // The four phases must run in this order.
    fn step(&self, state: &mut SimulationState, day: usize, demand: f64) {
        // 1. Arrivals
        let arrivals = state.pipeline.take_arrivals(day);
        state.on_hand += arrivals;

        // 2. Demand, capped at what is on the shelf
        let sales = state.on_hand.min(demand);
        let stockout = (demand - sales).max(0.0);
        state.stockout_units += stockout;
        state.total_sales += sales;
        state.on_hand -= sales;

        // 3. Holding cost on end-of-day stock
        state.holding_cost += self.holding_cost * state.on_hand;

        // 4. Reorder check, re-fires every day the trigger holds
        let order_placed = state.on_hand <= self.reorder_point;
        if order_placed {
            let order = PendingOrder {
                arrival_day: day + self.lead_time_days,
                quantity: self.order_quantity,
            };
            state.pipeline.push(order);
            state.ordering_cost += self.order_cost;
            state.order_count += 1;
            debug!(day, arrival_day = order.arrival_day, quantity = order.quantity, "order placed");
        }

        trace!(day, demand, arrivals, sales, on_hand = state.on_hand, "day closed");
        state.inventory_trace.push(state.on_hand);
        state.history.push(DailyRecord {
            day,
            demand,
            arrivals,
            sales,
            stockout,
            on_hand: state.on_hand,
            order_placed,
            pipeline_orders: state.pipeline.len(),
        });
    }
}

/// Runs one (Q, R) policy over `demand` with an empty starting stock.
pub fn simulate(
    demand: &DemandSeries,
    reorder_point: f64,
    order_quantity: f64,
    lead_time_days: u32,
    order_cost: f64,
    holding_cost: f64,
) -> Result<SimulationResult> {
    let simulation = InventorySimulation::new(
        reorder_point,
        order_quantity,
        lead_time_days,
        order_cost,
        holding_cost,
    )?;
    Ok(simulation.run(demand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    fn series(units: &[u32]) -> DemandSeries {
        DemandSeries::from_units(units)
    }

    #[test]
    fn worked_example() {
        let result = simulate(&series(&[10, 10, 10, 10, 10]), 15.0, 50.0, 2, 50.0, 2.0).unwrap();
        assert_eq!(result.inventory_trace, vec![0.0, 0.0, 40.0, 80.0, 70.0]);
        assert_eq!(result.holding_cost, 380.0);
        assert_eq!(result.ordering_cost, 100.0);
        assert_eq!(result.stockout_units, 20.0);
        assert_eq!(result.order_count, 2);
        assert_eq!(result.total_cost(), 480.0);
        assert_eq!(result.total_sales, 30.0);

        let day2 = &result.history[2];
        assert_eq!(day2.arrivals, 50.0);
        assert_eq!(day2.sales, 10.0);
        assert!(!day2.order_placed);
        assert_eq!(day2.pipeline_orders, 1);
        assert_eq!(result.history[1].pipeline_orders, 2);
    }

    #[test]
    fn empty_series() {
        let result = simulate(&series(&[]), 15.0, 50.0, 2, 50.0, 2.0).unwrap();
        assert_eq!(result.order_count, 0);
        assert_eq!(result.total_cost(), 0.0);
        assert_eq!(result.stockout_units, 0.0);
        assert!(result.inventory_trace.is_empty());
        assert!(result.history.is_empty());
    }

    #[test]
    fn zero_lead_time_arrives_next_day() {
        let result = simulate(&series(&[5, 5, 5]), 0.0, 20.0, 0, 10.0, 1.0).unwrap();
        // Day 0: stockout 5, order due day 0 placed after arrivals.
        // Day 1: receives 20, sells 5, 15 left.
        // Day 2: sells 5, 10 left.
        assert_eq!(result.inventory_trace, vec![0.0, 15.0, 10.0]);
        assert_eq!(result.order_count, 1);
        assert_eq!(result.stockout_units, 5.0);
        assert_eq!(result.history[1].arrivals, 20.0);
    }

    #[test]
    fn large_reorder_point_orders_every_day() {
        let result = simulate(&series(&[1, 1, 1, 1]), 1_000.0, 5.0, 1, 3.0, 1.0).unwrap();
        assert_eq!(result.order_count, 4);
        assert_eq!(result.ordering_cost, 12.0);
    }

    #[test]
    fn rejects_invalid_costs() {
        let demand = series(&[1]);
        assert!(matches!(
            simulate(&demand, 1.0, 5.0, 1, 3.0, 0.0),
            Err(InventoryError::Domain(_))
        ));
        assert!(simulate(&demand, 1.0, -5.0, 1, 3.0, 1.0).is_err());
        assert!(simulate(&demand, f64::NAN, 5.0, 1, 3.0, 1.0).is_err());
        assert!(simulate(&demand, 1.0, 5.0, 1, -3.0, 1.0).is_err());
    }

    #[test]
    fn from_policy_uses_parameters() {
        let params = PolicyParameters::default();
        let policy = ReorderPolicy {
            safety_stock: 0.0,
            reorder_point: 15.0,
            order_quantity: 50.0,
        };
        let sim = InventorySimulation::from_policy(&policy, &params).unwrap();
        let result = sim.run(&series(&[10, 10, 10, 10, 10]));
        assert_eq!(result.total_cost(), 480.0);
    }
}
