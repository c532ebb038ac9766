// src/io/demand.rs

use crate::ensure_domain;
use crate::error::{InventoryError, Result};
use crate::model::demand_series::DemandSeries;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Every day has the same demand. Useful for steady-state checks.
pub fn generate_constant_demand(days: usize, value: u32) -> DemandSeries {
    DemandSeries::from_units(&vec![value; days])
}

/// Daily demand drawn from a Normal distribution, rounded to whole units.
///
/// Negative draws are clamped to 0 since demand cannot be negative.
/// The same `seed` always yields the same series.
///
/// # Arguments
/// * `days` - Length of the series.
/// * `mean` - Average daily demand (e.g., 20.0).
/// * `std_dev` - Day-to-day volatility (e.g., 5.0).
/// * `seed` - RNG seed.
pub fn generate_normal_demand(
    days: usize,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<DemandSeries> {
    // rand_distr mirrors a negative std-dev instead of rejecting it.
    ensure_domain!(
        mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0,
        "demand needs a finite mean and non-negative std-dev, got {mean} and {std_dev}"
    );
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| InventoryError::Domain(format!("demand distribution: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let schedule: Vec<f64> = (0..days)
        .map(|_| normal.sample(&mut rng).round().max(0.0))
        .collect();
    DemandSeries::new(schedule)
}

/// A step pattern: `before` units per day until `step_day`, `after` from then on.
pub fn generate_step_demand(days: usize, step_day: usize, before: u32, after: u32) -> DemandSeries {
    let schedule: Vec<u32> = (0..days)
        .map(|day| if day < step_day { before } else { after })
        .collect();
    DemandSeries::from_units(&schedule)
}
