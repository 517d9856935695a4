use crate::{
    gateway::Pushgateway,
    metrics::FlightGauges,
    poller::Poller,
    source::OpenSkySource,
};
use color_eyre::Result;
use eyre::{
    bail,
    Context as _,
};
use opensky_client::OpenSkyClient;
use opensky_pusher_config::Config;

pub struct App {
    poller: Poller<OpenSkySource, Pushgateway>,
    once: bool,
}

impl App {
    pub fn new(config: &Config, once: bool) -> Result<Self> {
        let credentials = config.credentials();
        if credentials.is_none() {
            info!("no OpenSky credentials configured, using anonymous access");
        }

        let client = OpenSkyClient::new(&config.opensky_url, credentials, config.request_timeout)
            .context("Failed to create OpenSky client")?;
        let source = OpenSkySource::new(client, config.states_query());
        let gateway = Pushgateway::new(config.pushgateway_url.clone(), config.request_timeout)
            .context("Failed to create Pushgateway client")?;
        let gauges = FlightGauges::new(config.prune_positions).context("Failed to register gauges")?;

        info!(
            opensky_url = %config.opensky_url,
            pushgateway_url = %config.pushgateway_url,
            job = %config.job,
            interval = %humantime::format_duration(config.interval),
            bbox = ?config.bbox,
            icao24 = config.icao24.len(),
            "configured"
        );

        Ok(Self {
            poller: Poller::new(source, gateway, gauges, config.job.clone(), config.interval),
            once,
        })
    }

    /// Poll until ctrl-c, or exactly once when started with `--once`. A failed
    /// single poll is returned as an error so cron-style supervisors see it.
    pub async fn run(self) -> Result<()> {
        if self.once {
            if self.poller.run_cycles(1).await > 0 {
                bail!("the poll cycle failed");
            }
            return Ok(());
        }

        tokio::select! {
            _ = self.poller.run() => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for ctrl-c")?;
                info!("received ctrl-c, shutting down");
            }
        }
        Ok(())
    }
}
