//! # OpenSky Pusher
//!
//! Polls the OpenSky Network for current aircraft state vectors on a fixed
//! interval, reduces each snapshot to a few gauges and pushes them to a
//! Prometheus Pushgateway.
//!
//! ## Architecture
//!
//! - **`source`**: where snapshots come from (`StateSource`, backed by `opensky-client`)
//! - **`metrics`**: aggregate computation and the gauge registry
//! - **`gateway`**: where metrics go (`MetricsSink`, backed by the Pushgateway HTTP API)
//! - **`poller`**: the fetch → compute → push cycle and the loop driving it

#[macro_use]
extern crate tracing;

mod app;
pub mod gateway;
mod logging;
pub mod metrics;
pub mod poller;
pub mod source;

pub use app::App;
pub use logging::{
    init_errors,
    init_logging,
};
pub use opensky_pusher_config::{
    Args,
    Config,
};
pub use poller::{
    CycleError,
    CycleOutcome,
    Poller,
};
