// src/simulation/config.rs

use crate::ensure_domain;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cost and service inputs of a (Q, R) policy.
///
/// Built once from the front end and passed by value; the engine keeps no
/// global parameter state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Fixed cost per order placed (K).
    pub order_cost: f64,
    /// Cost per unit held per day (h).
    pub holding_cost: f64,
    /// Target cycle service level, strictly inside (0, 1).
    pub target_service_level: f64,
    pub lead_time_days: u32,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            order_cost: 50.0,
            holding_cost: 2.0,
            target_service_level: 0.95,
            lead_time_days: 2,
        }
    }
}

impl PolicyParameters {
    /// Validating constructor. The lead time is taken signed so that a
    /// negative value from user input is reported instead of wrapped.
    pub fn new(
        order_cost: f64,
        holding_cost: f64,
        target_service_level: f64,
        lead_time_days: i64,
    ) -> Result<Self> {
        ensure_domain!(
            lead_time_days >= 0,
            "lead time must be non-negative, got {lead_time_days}"
        );
        let lead_time_days = u32::try_from(lead_time_days).map_err(|_| {
            crate::error::InventoryError::Domain(format!(
                "lead time {lead_time_days} does not fit in a day count"
            ))
        })?;
        let params = Self {
            order_cost,
            holding_cost,
            target_service_level,
            lead_time_days,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_domain!(
            self.order_cost.is_finite() && self.order_cost >= 0.0,
            "order cost must be non-negative, got {}",
            self.order_cost
        );
        ensure_domain!(
            self.holding_cost.is_finite() && self.holding_cost > 0.0,
            "holding cost must be positive, got {}",
            self.holding_cost
        );
        ensure_domain!(
            self.target_service_level > 0.0 && self.target_service_level < 1.0,
            "target service level must lie strictly between 0 and 1, got {}",
            self.target_service_level
        );
        Ok(())
    }

    /// Same parameters with a different target service level.
    pub fn with_service_level(self, target_service_level: f64) -> Self {
        Self {
            target_service_level,
            ..self
        }
    }
}

/// Settings of one headless run of the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub days: usize,
    pub demand_mean: f64,
    pub demand_std_dev: f64,
    pub seed: u64,
    pub policy: PolicyParameters,
    pub sweep_levels: Vec<f64>,
    pub out_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            days: 365,
            demand_mean: 20.0,
            demand_std_dev: 5.0,
            seed: 42,
            policy: PolicyParameters::default(),
            sweep_levels: vec![0.85, 0.90, 0.95, 0.98, 0.99],
            out_dir: PathBuf::from("."),
        }
    }
}
