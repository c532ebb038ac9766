// src/strategy/traits.rs

use crate::error::Result;
use crate::model::demand_series::DemandSeries;
use serde::Serialize;
use std::fmt::Debug;

/// Upper-quantile demand forecast over a held-out tail of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileForecast {
    /// Quantile the forecast targets, e.g. 0.95.
    pub quantile: f64,
    /// Index in the source series of the first forecast day.
    pub start_day: usize,
    pub actual: Vec<f64>,
    pub forecast: Vec<f64>,
}

impl QuantileForecast {
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Share of held-out days whose demand stayed at or under the forecast.
    /// A calibrated forecast lands near `quantile`.
    pub fn coverage(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let covered = self
            .actual
            .iter()
            .zip(&self.forecast)
            .filter(|(actual, forecast)| actual <= forecast)
            .count();
        covered as f64 / self.len() as f64
    }

    pub fn mean_absolute_error(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .actual
            .iter()
            .zip(&self.forecast)
            .map(|(actual, forecast)| (actual - forecast).abs())
            .sum();
        total / self.len() as f64
    }
}

/// Produces quantile demand forecasts from a demand history.
///
/// The policy engine never depends on a forecaster. A failure is reported as
/// `InventoryError::CollaboratorUnavailable` and the caller carries on.
pub trait DemandForecaster: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Trains on the head of `history` and forecasts its held-out tail.
    fn forecast(&self, history: &DemandSeries) -> Result<QuantileForecast>;
}
