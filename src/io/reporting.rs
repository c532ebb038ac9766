// src/io/reporting.rs

use crate::simulation::engine::DailyRecord;
use crate::simulation::sweep::SweepPoint;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tracing::info;

/// Flat CSV row for one point of the service-level curve.
#[derive(Debug, Clone, Serialize)]
struct SweepRow {
    target_service_level: f64,
    reorder_point: f64,
    order_quantity: f64,
    total_cost: f64,
    holding_cost: f64,
    ordering_cost: f64,
    orders: usize,
    service_level: f64,
}

impl From<&SweepPoint> for SweepRow {
    fn from(point: &SweepPoint) -> Self {
        let metrics = point.metrics.rounded();
        Self {
            target_service_level: point.target_service_level,
            reorder_point: point.reorder_point,
            order_quantity: point.order_quantity,
            total_cost: metrics.total_cost,
            holding_cost: metrics.holding_cost,
            ordering_cost: metrics.ordering_cost,
            orders: metrics.order_count,
            service_level: metrics.service_level,
        }
    }
}

fn write_rows<T: Serialize>(
    path: &Path,
    rows: impl IntoIterator<Item = T>,
) -> Result<usize, Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut written = 0;
    for row in rows {
        wtr.serialize(row)?;
        written += 1;
    }
    wtr.flush()?;
    info!(rows = written, path = %path.display(), "csv exported");
    Ok(written)
}

/// Writes the day-by-day simulation history to a CSV file.
pub fn write_simulation_log(path: &Path, data: &[DailyRecord]) -> Result<usize, Box<dyn Error>> {
    write_rows(path, data)
}

/// Writes the service-level curve to a CSV file, costs rounded for display.
pub fn write_sweep(path: &Path, points: &[SweepPoint]) -> Result<usize, Box<dyn Error>> {
    write_rows(path, points.iter().map(SweepRow::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::demand_series::DemandSeries;
    use crate::simulation::config::PolicyParameters;
    use crate::simulation::engine::simulate;
    use crate::simulation::sweep::service_level_sweep;
    use std::fs;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("inventory-policy-sim-{}-{name}", std::process::id()))
    }

    #[test]
    fn history_csv_has_header_and_one_row_per_day() {
        let demand = DemandSeries::from_units(&[10, 10, 10, 10, 10]);
        let result = simulate(&demand, 15.0, 50.0, 2, 50.0, 2.0).unwrap();
        let path = scratch("history.csv");

        assert_eq!(write_simulation_log(&path, &result.history).unwrap(), 5);
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "day,demand,arrivals,sales,stockout,on_hand,order_placed,pipeline_orders"
        );
        assert_eq!(lines.count(), 5);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn sweep_csv_rows() {
        let demand = DemandSeries::from_units(&[8, 12, 10, 15, 5, 9, 11, 14, 6, 10]);
        let points =
            service_level_sweep(&demand, &PolicyParameters::default(), &[0.9, 0.95]).unwrap();
        let path = scratch("sweep.csv");

        assert_eq!(write_sweep(&path, &points).unwrap(), 2);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("target_service_level,reorder_point,order_quantity,total_cost"));
        assert_eq!(text.lines().count(), 3);
        fs::remove_file(&path).ok();
    }
}
