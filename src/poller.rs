//! # Poller
//!
//! One cycle is fetch → aggregate → record → push. Cycles run strictly one
//! after another on the calling task, so a slow request delays the next poll
//! instead of overlapping with it.

use crate::{
    gateway::{
        GatewayError,
        MetricsSink,
    },
    metrics::{
        positions,
        AggregateMetrics,
        FlightGauges,
    },
    source::StateSource,
};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Pushed { flights: usize, positions: usize },
    /// The provider had no snapshot; the gateway keeps the previous values.
    NoData,
}

#[derive(thiserror::Error, Debug)]
pub enum CycleError {
    #[error("fetching state vectors failed")]
    Provider(#[from] opensky_client::Error),
    #[error("encoding the gauges failed")]
    Encode(#[from] prometheus::Error),
    #[error("pushing metrics to the gateway failed")]
    Gateway(#[from] GatewayError),
}

pub struct Poller<S, K> {
    source: S,
    sink: K,
    gauges: FlightGauges,
    job: String,
    interval: Duration,
}

impl<S: StateSource, K: MetricsSink> Poller<S, K> {
    pub fn new(source: S, sink: K, gauges: FlightGauges, job: impl Into<String>, interval: Duration) -> Self {
        Self {
            source,
            sink,
            gauges,
            job: job.into(),
            interval,
        }
    }

    pub fn gauges(&self) -> &FlightGauges {
        &self.gauges
    }

    /// Poll the provider once and push the result. Nothing is pushed when the
    /// provider has no snapshot.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        let Some(states) = self.source.fetch().await? else {
            return Ok(CycleOutcome::NoData);
        };

        let aggregate = AggregateMetrics::from_states(&states.states);
        let positions = positions(&states.states);
        debug!(
            time = states.time,
            flights = aggregate.flight_count,
            avg_altitude = aggregate.avg_altitude,
            avg_speed = aggregate.avg_speed,
            positions = positions.len(),
            "computed flight metrics"
        );

        self.gauges.record(&aggregate, &positions);
        let body = self.gauges.encode()?;
        self.sink.push(&self.job, body).await?;

        Ok(CycleOutcome::Pushed {
            flights: aggregate.flight_count,
            positions: positions.len(),
        })
    }

    /// Poll forever, sleeping `interval` after each cycle. Failures are logged
    /// and the next cycle is the retry.
    pub async fn run(&self) {
        info!(interval = ?self.interval, job = %self.job, "starting poll loop");
        loop {
            self.cycle_and_log().await;
            sleep(self.interval).await;
        }
    }

    /// Like [`Poller::run`] but stops after `cycles` polls. Returns how many
    /// of them failed.
    pub async fn run_cycles(&self, cycles: u64) -> u64 {
        let mut failed = 0;
        for cycle in 0..cycles {
            if cycle > 0 {
                sleep(self.interval).await;
            }
            if !self.cycle_and_log().await {
                failed += 1;
            }
        }
        failed
    }

    /// `false` when the cycle failed. A missing snapshot is not a failure.
    async fn cycle_and_log(&self) -> bool {
        match self.run_cycle().await {
            Ok(CycleOutcome::Pushed { flights, positions }) => {
                info!(flights, positions, job = %self.job, "pushed flight metrics");
                true
            }
            Ok(CycleOutcome::NoData) => {
                warn!("no state vectors received, previously pushed values stay on the gateway");
                true
            }
            Err(err) => {
                error!("poll cycle failed: {:?}", eyre::Report::new(err));
                false
            }
        }
    }
}
