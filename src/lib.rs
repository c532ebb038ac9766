//! Reorder-point / order-quantity inventory policies: derivation from demand
//! history, day-stepped simulation, and KPI evaluation.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{InventoryError, Result};
pub use model::demand_series::{DemandSeries, DemandStats};
pub use simulation::config::PolicyParameters;
pub use simulation::engine::{simulate, InventorySimulation, SimulationResult};
pub use simulation::metrics::{evaluate, Metrics};
pub use strategy::optimization::{derive_policy, eoq, reorder_point, safety_stock, ReorderPolicy};
