//! # Metrics Module
//!
//! - **`aggregate`**: per-snapshot statistics and aircraft positions, pure functions
//! - **`gauges`**: the Prometheus registry those values are written into

pub mod aggregate;
pub mod gauges;

pub use aggregate::{
    positions,
    AggregateMetrics,
    PositionMetric,
};
pub use gauges::FlightGauges;
