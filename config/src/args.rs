use clap::Parser;
use opensky_client::BoundingBox;
use std::path::PathBuf;
use url::Url;

/// Poll OpenSky state vectors and push flight gauges to a Prometheus Pushgateway.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Optional YAML file layered between the built-in defaults and these arguments.
    #[arg(long, value_name = "FILE", env = "OPENSKY_PUSHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// OpenSky account name. Requests are anonymous when unset.
    #[arg(long, env = "OPEN_SKY_USERNAME")]
    pub opensky_username: Option<String>,

    /// OpenSky account password.
    #[arg(long, env = "OPEN_SKY_PASSWORD", hide_env_values = true)]
    pub opensky_password: Option<String>,

    /// Base URL of the OpenSky REST API.
    #[arg(long, value_name = "URL", env = "OPEN_SKY_API_URL")]
    pub opensky_url: Option<Url>,

    /// Only request these transponder addresses (comma separated or repeated).
    #[arg(long, value_name = "ICAO24", env = "OPEN_SKY_ICAO24", value_delimiter = ',')]
    pub icao24: Vec<String>,

    /// Only request aircraft inside `lamin,lomin,lamax,lomax`.
    #[arg(long, value_name = "BBOX", env = "OPEN_SKY_BBOX", allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Pushgateway base URL (e.g. http://localhost:9091).
    #[arg(long, value_name = "URL", env = "PUSHGATEWAY_URL")]
    pub pushgateway_url: Option<Url>,

    /// Job name the metrics are grouped under on the gateway.
    #[arg(long, env = "PUSHGATEWAY_JOB")]
    pub job: Option<String>,

    /// Time between polls (e.g. "15m", "90s").
    #[arg(long, env = "OPENSKY_PUSHER_INTERVAL")]
    pub interval: Option<humantime::Duration>,

    /// Timeout applied to each API and gateway request.
    #[arg(long, env = "OPENSKY_PUSHER_REQUEST_TIMEOUT")]
    pub request_timeout: Option<humantime::Duration>,

    /// Drop position series of aircraft that are no longer reported.
    #[arg(long, action, env = "OPENSKY_PUSHER_PRUNE_POSITIONS")]
    pub prune_positions: bool,

    /// Run a single poll and exit.
    #[arg(long, action)]
    pub once: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(username) = &self.opensky_username {
                cache.insert("opensky_username".to_string(), username.clone().into());
            }
            if let Some(password) = &self.opensky_password {
                cache.insert("opensky_password".to_string(), password.clone().into());
            }
            if let Some(url) = &self.opensky_url {
                cache.insert("opensky_url".to_string(), url.to_string().into());
            }
            if !self.icao24.is_empty() {
                cache.insert("icao24".to_string(), self.icao24.clone().into());
            }
            if let Some(bbox) = &self.bbox {
                cache.insert("bbox".to_string(), bbox.to_string().into());
            }
            if let Some(url) = &self.pushgateway_url {
                cache.insert("pushgateway_url".to_string(), url.to_string().into());
            }
            if let Some(job) = &self.job {
                cache.insert("job".to_string(), job.clone().into());
            }
            if let Some(interval) = &self.interval {
                cache.insert("interval".to_string(), interval.to_string().into());
            }
            if let Some(timeout) = &self.request_timeout {
                cache.insert("request_timeout".to_string(), timeout.to_string().into());
            }
            if self.prune_positions {
                cache.insert("prune_positions".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}
