//! Headless run: derive a (Q, R) policy from demand history, simulate it,
//! sweep the service-level curve and try the optional demand forecast.

use anyhow::{bail, Context, Result};
use inventory_policy_sim::io::{demand, reporting};
use inventory_policy_sim::simulation::config::{PolicyParameters, RunConfig};
use inventory_policy_sim::simulation::sweep::service_level_sweep;
use inventory_policy_sim::strategy::implementations::ResidualQuantileForecaster;
use inventory_policy_sim::strategy::traits::DemandForecaster;
use inventory_policy_sim::{derive_policy, evaluate, InventoryError, InventorySimulation};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let raw = value.with_context(|| format!("{flag} needs a value"))?;
    raw.parse()
        .map_err(|_| anyhow::anyhow!("{flag}: cannot parse '{raw}'"))
}

fn parse_args() -> Result<RunConfig> {
    let mut cfg = RunConfig::default();
    let defaults = cfg.policy;
    let mut order_cost = defaults.order_cost;
    let mut holding_cost = defaults.holding_cost;
    let mut csl = defaults.target_service_level;
    let mut lead_time = i64::from(defaults.lead_time_days);

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--days" => cfg.days = parse_value(&arg, it.next())?,
            "--mean" => cfg.demand_mean = parse_value(&arg, it.next())?,
            "--std-dev" => cfg.demand_std_dev = parse_value(&arg, it.next())?,
            "--seed" => cfg.seed = parse_value(&arg, it.next())?,
            "--order-cost" => order_cost = parse_value(&arg, it.next())?,
            "--holding-cost" => holding_cost = parse_value(&arg, it.next())?,
            "--csl" => csl = parse_value(&arg, it.next())?,
            "--lead-time" => lead_time = parse_value(&arg, it.next())?,
            "--out-dir" => cfg.out_dir = PathBuf::from(parse_value::<String>(&arg, it.next())?),
            other => bail!("unknown argument: {other}"),
        }
    }
    cfg.policy = PolicyParameters::new(order_cost, holding_cost, csl, lead_time)?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. CONFIGURATION
    let cfg = parse_args()?;
    let params = cfg.policy;
    info!(?params, days = cfg.days, seed = cfg.seed, "starting run");

    // 2. DEMAND HISTORY
    let history =
        demand::generate_normal_demand(cfg.days, cfg.demand_mean, cfg.demand_std_dev, cfg.seed)?;
    let stats = history.stats()?;
    info!(mean = stats.mean, variance = stats.variance, total = stats.total, "demand loaded");

    // 3. POLICY
    let policy = derive_policy(&stats, &params)?;
    println!("=== Inventory Policy ===");
    println!("Safety Stock (SS)   = {:.1}", policy.safety_stock);
    println!("Reorder Point (R)   = {:.1}", policy.reorder_point);
    println!("Order Quantity (Q)  = {:.1}", policy.order_quantity);

    // 4. SIMULATION + EVALUATION
    let result = InventorySimulation::from_policy(&policy, &params)?.run(&history);
    println!("\n=== Results ===");
    match evaluate(&result, stats.total) {
        Ok(metrics) => println!("{}", serde_json::to_string_pretty(&metrics)?),
        Err(InventoryError::DivideByZero) => {
            warn!("no realized demand, service level undefined");
            println!("Total Cost: {:.2} | Service Level: undefined", result.total_cost());
        }
        Err(e) => return Err(e.into()),
    }
    reporting::write_simulation_log(&cfg.out_dir.join("inventory_trace.csv"), &result.history)
        .map_err(|e| anyhow::anyhow!("writing inventory trace: {e}"))?;

    // 5. COST VS SERVICE LEVEL
    println!("\n=== Cost vs Service Level ===");
    match service_level_sweep(&history, &params, &cfg.sweep_levels) {
        Ok(points) => {
            for point in &points {
                let m = point.metrics.rounded();
                println!(
                    "CSL {:.2}: R = {:.1}, Total Cost = ${:.2}, Service Level = {:.3}",
                    point.target_service_level, point.reorder_point, m.total_cost, m.service_level
                );
            }
            reporting::write_sweep(&cfg.out_dir.join("service_level_curve.csv"), &points)
                .map_err(|e| anyhow::anyhow!("writing sweep: {e}"))?;
        }
        Err(InventoryError::DivideByZero) => warn!("sweep skipped: no realized demand"),
        Err(e) => return Err(e.into()),
    }

    // 6. OPTIONAL FORECAST
    let forecaster = ResidualQuantileForecaster::rolling();
    match forecaster.forecast(&history) {
        Ok(forecast) => {
            println!("\n=== Forecast vs Actual ({}) ===", forecaster.name());
            println!(
                "{} held-out days from day {}: coverage {:.1}% (target {:.0}%), MAE {:.2}",
                forecast.len(),
                forecast.start_day,
                forecast.coverage() * 100.0,
                forecast.quantile * 100.0,
                forecast.mean_absolute_error()
            );
        }
        Err(e) => info!("demand forecasting not available: {e}"),
    }

    println!("\nRun complete.");
    Ok(())
}
