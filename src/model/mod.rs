pub mod demand_series;
pub mod queues;
