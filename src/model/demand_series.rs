// src/model/demand_series.rs

use crate::ensure_domain;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Daily demand observations in chronological order.
///
/// Values are validated once on construction (finite, non-negative) and the
/// series is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    values: Vec<f64>,
}

/// Summary statistics used by the policy calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandStats {
    pub mean: f64,
    /// Population variance over the full series.
    pub variance: f64,
    pub std_dev: f64,
    pub total: f64,
    pub days: usize,
}

impl DemandSeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        for (day, value) in values.iter().enumerate() {
            ensure_domain!(
                value.is_finite() && *value >= 0.0,
                "demand on day {day} must be finite and non-negative, got {value}"
            );
        }
        Ok(Self { values })
    }

    /// Lossless conversion from integer unit counts.
    pub fn from_units(units: &[u32]) -> Self {
        Self {
            values: units.iter().map(|&u| f64::from(u)).collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Mean and population variance of the series.
    ///
    /// Fails on an empty series, for which neither is defined.
    pub fn stats(&self) -> Result<DemandStats> {
        ensure_domain!(
            !self.is_empty(),
            "demand statistics need at least one observation"
        );
        let mean = self.values.iter().mean();
        let variance = self.values.iter().population_variance();
        Ok(DemandStats {
            mean,
            variance,
            std_dev: variance.sqrt(),
            total: self.total(),
            days: self.len(),
        })
    }
}
