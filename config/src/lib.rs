//! # Configuration
//!
//! Settings are layered with the `config` crate, later sources winning:
//!
//! 1. built-in defaults (`default-config.yaml`)
//! 2. an optional YAML file passed with `--config`
//! 3. command-line arguments and their environment variables
//!    (`OPEN_SKY_USERNAME`, `OPEN_SKY_PASSWORD`, `PUSHGATEWAY_URL`, ...)

#[macro_use]
extern crate tracing;

mod args;

pub use args::Args;
use eyre::{
    bail,
    Context as _,
    Result,
};
use opensky_client::{
    BoundingBox,
    Credentials,
    StatesQuery,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    time::Duration,
};
use url::Url;

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub opensky_url: Url,
    #[serde(default)]
    pub opensky_username: Option<String>,
    #[serde(default)]
    pub opensky_password: Option<Password>,
    #[serde(default)]
    pub icao24: Vec<String>,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
    pub pushgateway_url: Url,
    pub job: String,
    #[serde(with = "human_duration")]
    pub interval: Duration,
    #[serde(with = "human_duration")]
    pub request_timeout: Duration,
    #[serde(default)]
    pub prune_positions: bool,
}

impl Config {
    pub fn new(args: &Args) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        if let Some(path) = &args.config {
            debug!(?path, "loading config file");
            builder = builder.add_source(config::File::from(path.as_path()).format(config::FileFormat::Yaml));
        }

        builder = builder.add_source(args.clone());

        let cfg: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        match (&self.opensky_username, &self.opensky_password) {
            (Some(_), None) => bail!("OPEN_SKY_USERNAME is set but OPEN_SKY_PASSWORD is missing"),
            (None, Some(_)) => bail!("OPEN_SKY_PASSWORD is set but OPEN_SKY_USERNAME is missing"),
            _ => {}
        }
        if self.interval.is_zero() {
            bail!("interval must be greater than zero");
        }
        if self.request_timeout.is_zero() {
            bail!("request_timeout must be greater than zero");
        }
        if self.job.trim().is_empty() {
            bail!("job must not be empty");
        }
        // The gateway only accepts `/` in grouping values in its base64 form.
        if self.job.contains('/') {
            bail!("job must not contain '/', got {:?}", self.job);
        }
        Ok(())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.opensky_username, &self.opensky_password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.0.clone(),
            }),
            _ => None,
        }
    }

    pub fn states_query(&self) -> StatesQuery {
        StatesQuery {
            icao24: self.icao24.clone(),
            bbox: self.bbox,
            ..StatesQuery::default()
        }
    }
}

/// Keeps the password out of `Debug` output and logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

mod human_duration {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let value = String::deserialize(deserializer)?;
        humantime::parse_duration(&value).map_err(serde::de::Error::custom)
    }
}
