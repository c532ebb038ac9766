// src/strategy/implementations.rs

use crate::error::{InventoryError, Result};
use crate::model::demand_series::DemandSeries;
use crate::strategy::traits::{DemandForecaster, QuantileForecast};
use statrs::statistics::{Data, OrderStatistics};
use tracing::debug;

/// Longest look-back used by the features; earlier days get no row.
pub const MAX_WINDOW: usize = 14;
/// Share of feature rows held out for the forecast, taken from the end.
pub const TEST_FRACTION: f64 = 0.2;
pub const MIN_TRAINING_ROWS: usize = 5;
pub const DEFAULT_QUANTILE: f64 = 0.95;

// =========================================================================
// Feature engineering
// =========================================================================

/// Lag and rolling-mean features for one day, built only from earlier days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub day: usize,
    pub lag1: f64,
    pub roll7: f64,
    pub roll14: f64,
    pub target: f64,
}

pub fn build_features(series: &DemandSeries) -> Vec<FeatureRow> {
    let values = series.values();
    let mean = |window: &[f64]| window.iter().sum::<f64>() / window.len() as f64;
    (MAX_WINDOW..values.len())
        .map(|day| FeatureRow {
            day,
            lag1: values[day - 1],
            roll7: mean(&values[day - 7..day]),
            roll14: mean(&values[day - 14..day]),
            target: values[day],
        })
        .collect()
}

/// Chronological split: no shuffling, the test block is the tail.
pub fn split_train_test(rows: &[FeatureRow]) -> (&[FeatureRow], &[FeatureRow]) {
    let test_len = (rows.len() as f64 * TEST_FRACTION).ceil() as usize;
    rows.split_at(rows.len() - test_len)
}

// =========================================================================
// Residual quantile forecaster
// =========================================================================

/// Feature used as the point estimate of a day's demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Yesterday's demand.
    LastDay,
    /// Mean of the previous 7 days.
    WeeklyMean,
    /// Mean of the previous 14 days.
    FortnightMean,
}

impl Baseline {
    fn value(self, row: &FeatureRow) -> f64 {
        match self {
            Baseline::LastDay => row.lag1,
            Baseline::WeeklyMean => row.roll7,
            Baseline::FortnightMean => row.roll14,
        }
    }
}

/// Point baseline lifted by the empirical upper quantile of its training
/// residuals (actual minus baseline).
#[derive(Debug, Clone)]
pub struct ResidualQuantileForecaster {
    name: String,
    baseline: Baseline,
    quantile: f64,
}

impl ResidualQuantileForecaster {
    pub fn new(baseline: Baseline, quantile: f64) -> Self {
        let name = match baseline {
            Baseline::LastDay => "naive-lag1",
            Baseline::WeeklyMean => "rolling-7d",
            Baseline::FortnightMean => "rolling-14d",
        };
        Self {
            name: format!("{name}-q{:.0}", quantile * 100.0),
            baseline,
            quantile,
        }
    }

    /// Weekly rolling mean at the default 95th percentile.
    pub fn rolling() -> Self {
        Self::new(Baseline::WeeklyMean, DEFAULT_QUANTILE)
    }

    /// Yesterday's demand at the default 95th percentile.
    pub fn naive() -> Self {
        Self::new(Baseline::LastDay, DEFAULT_QUANTILE)
    }
}

impl DemandForecaster for ResidualQuantileForecaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn forecast(&self, history: &DemandSeries) -> Result<QuantileForecast> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(InventoryError::CollaboratorUnavailable(format!(
                "quantile must lie strictly between 0 and 1, got {}",
                self.quantile
            )));
        }

        let rows = build_features(history);
        let (train, test) = split_train_test(&rows);
        if train.len() < MIN_TRAINING_ROWS || test.is_empty() {
            return Err(InventoryError::CollaboratorUnavailable(format!(
                "{} days of history give {} training rows, need {}",
                history.len(),
                train.len(),
                MIN_TRAINING_ROWS
            )));
        }

        let residuals: Vec<f64> = train
            .iter()
            .map(|row| row.target - self.baseline.value(row))
            .collect();
        let lift = Data::new(residuals).quantile(self.quantile);
        debug!(forecaster = %self.name, training_rows = train.len(), lift, "forecaster fitted");

        Ok(QuantileForecast {
            quantile: self.quantile,
            start_day: test[0].day,
            actual: test.iter().map(|row| row.target).collect(),
            forecast: test
                .iter()
                .map(|row| (self.baseline.value(row) + lift).max(0.0))
                .collect(),
        })
    }
}
